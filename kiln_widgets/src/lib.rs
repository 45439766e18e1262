// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kiln Widgets: a retained-mode widget tree for in-engine game UI.
//!
//! A [`Gui`] owns a tree of widgets rooted at a frame:
//!
//! - [`Frame`]: a container with its own scroll offset, two scrollbars, images and a list of rows.
//! - [`Button`]: push, toggle, checkbox and drop-down buttons.
//! - [`Field`]: single-line text input with Tab hand-off between fields.
//! - [`Slider`]: a handle dragged along a rail.
//!
//! Every tick the host builds an [`InputSnapshot`](kiln_host::input::InputSnapshot) and calls
//! [`Gui::tick`] (or [`Gui::process`] and [`Gui::postprocess`]), then [`Gui::draw`] with its
//! [`RenderSink`](kiln_host::render::RenderSink).
//!
//! ## Input routing
//!
//! Input is offered topmost first. Inside a frame that means child frames
//! back-to-front, then the frame's scrollbars, buttons, sliders, list rows
//! and fields. The first element that takes the pointer makes it unusable
//! for everything underneath it for the rest of the tick, including
//! siblings of enclosing frames.
//!
//! ## Identity and lifetime
//!
//! Widgets are addressed by generational [`WidgetId`]s and list rows by
//! [`EntryHandle`]s. Removing a widget frees its subtree; ids that pointed
//! into it go stale and every lookup with them returns `None`. Removals
//! requested while a pass is running wait until the pass ends, so callbacks
//! can close the frame they live in.
//!
//! Cross references between widgets (navigation links, Tab destinations)
//! are names, resolved each time they are followed by [`Gui::find_widget`].
//! Lookups and selection only see widgets of one owner (player), so several
//! players can share one tree.
//!
//! ## Minimal usage
//!
//! ```
//! use kiln_host::input::InputSnapshot;
//! use kiln_host::platform::FixedClock;
//! use kiln_host::render::NullSink;
//! use kiln_host::Rect;
//! use kiln_widgets::Gui;
//!
//! let mut gui = Gui::new(Rect::new(0, 0, 640, 480));
//! let root = gui.root();
//! let list = gui.add_frame(root, "inventory", Rect::new(20, 20, 200, 100)).unwrap();
//! gui.set_actual_size(list, 200, 300).unwrap();
//!
//! // One wheel tick over the list scrolls four rows.
//! let mut input = InputSnapshot::at(60, 60);
//! input.scroll(0, 1);
//! gui.tick(&mut input, &FixedClock(0));
//! assert_eq!(gui.frame(list).unwrap().scroll(), (0, 80));
//!
//! gui.draw(&mut NullSink);
//! ```

mod button;
mod draw;
mod entry;
mod error;
mod field;
mod frame;
mod gui;
mod paint;
mod process;
mod slider;
mod slots;
mod style;
mod widget;

#[cfg(test)]
mod scenarios;

pub use button::{Button, ButtonResult, ButtonStyle};
pub use entry::{Entry, EntryCallback, EntryHandle, EntryListener};
pub use error::GuiError;
pub use field::{Field, FieldResult};
pub use frame::{Axis, Frame, FrameResult, HeldInputs, Image};
pub use gui::Gui;
pub use paint::Justify;
pub use slider::{Slider, SliderResult};
pub use style::{ConfigError, NavBindings, Style};
pub use widget::{
    Callback, Highlight, Links, NavAction, Navigation, WidgetBase, WidgetFlags, WidgetId,
    WidgetKind,
};
