// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List rows and weak listeners.
//!
//! Entries are lightweight rows in a frame's list. They live in the
//! [`Gui`]'s own slot store, and outside code refers to them through
//! [`EntryHandle`]s, which go stale once the row is removed. An
//! [`EntryListener`] wraps a handle for code that wants to recolour, rename
//! or delete a row it does not own:
//!
//! ```
//! use kiln_host::{Color, Rect};
//! use kiln_widgets::{EntryListener, Gui};
//!
//! let mut gui = Gui::new(Rect::new(0, 0, 320, 240));
//! let root = gui.root();
//! let row = gui.add_entry(root, "sword", "Iron sword").unwrap();
//! let listener = EntryListener::new(row);
//!
//! assert!(listener.change_color(&mut gui, Color::rgba(255, 0, 0, 255)));
//! assert!(listener.delete(&mut gui));
//! // The row is swept on the next pass over the list.
//! gui.tick(&mut kiln_host::input::InputSnapshot::default(), &kiln_host::platform::FixedClock(0));
//! assert!(!listener.is_alive(&gui));
//! assert!(!listener.change_name(&mut gui, "axe"));
//! ```

use std::fmt;
use std::rc::Rc;

use kiln_host::Color;

use crate::gui::Gui;
use crate::slots::SlotKey;
use crate::widget::WidgetId;

/// Generation-checked handle to a list row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(pub(crate) SlotKey);

impl EntryHandle {
    /// Pack the handle into 64 bits, e.g. for a script pointer argument.
    pub fn to_bits(self) -> u64 {
        self.0.to_bits()
    }
}

/// Native handler invoked for list row events.
pub type EntryCallback = Rc<dyn Fn(&mut Gui, EntryHandle)>;

/// A row in a frame's list.
pub struct Entry {
    /// Name; used as the script event when no click handler is set.
    pub name: String,
    /// Displayed text.
    pub text: String,
    /// Text colour.
    pub color: Color,
    /// Fired when the row is pressed.
    pub click: Option<EntryCallback>,
    /// Fired instead of `click` when the row is pressed with Ctrl held.
    pub ctrl_click: Option<EntryCallback>,
    /// Fired when the pointer enters the row.
    pub highlight: Option<EntryCallback>,
    /// Fired every tick the pointer stays over the row.
    pub highlighting: Option<EntryCallback>,
    /// Remove the row at the start of the next list pass.
    pub suicide: bool,
    pub(crate) highlighted: bool,
    pub(crate) pressed: bool,
    pub(crate) frame: WidgetId,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("color", &self.color)
            .field("suicide", &self.suicide)
            .field("highlighted", &self.highlighted)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl Entry {
    pub(crate) fn new(frame: WidgetId, name: &str, text: &str, color: Color) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            color,
            click: None,
            ctrl_click: None,
            highlight: None,
            highlighting: None,
            suicide: false,
            highlighted: false,
            pressed: false,
            frame,
        }
    }

    /// Frame whose list holds the row.
    pub fn frame(&self) -> WidgetId {
        self.frame
    }

    /// Whether the pointer is over the row.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Whether the left button is held over the row.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the click handler.
    pub fn on_click(&mut self, f: impl Fn(&mut Gui, EntryHandle) + 'static) {
        self.click = Some(Rc::new(f));
    }

    /// Set the Ctrl-click handler.
    pub fn on_ctrl_click(&mut self, f: impl Fn(&mut Gui, EntryHandle) + 'static) {
        self.ctrl_click = Some(Rc::new(f));
    }

    /// Set the hover-enter handler.
    pub fn on_highlight(&mut self, f: impl Fn(&mut Gui, EntryHandle) + 'static) {
        self.highlight = Some(Rc::new(f));
    }

    /// Set the per-tick hover handler.
    pub fn on_highlighting(&mut self, f: impl Fn(&mut Gui, EntryHandle) + 'static) {
        self.highlighting = Some(Rc::new(f));
    }
}

/// Weak reference to a row held by code outside the widget tree.
///
/// Every operation is a no-op returning `false` once the row is gone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryListener {
    handle: EntryHandle,
}

impl EntryListener {
    /// Listen to `handle`.
    pub fn new(handle: EntryHandle) -> Self {
        Self { handle }
    }

    /// The row listened to.
    pub fn handle(&self) -> EntryHandle {
        self.handle
    }

    /// Whether the row still exists.
    pub fn is_alive(&self, gui: &Gui) -> bool {
        gui.entry(self.handle).is_some()
    }

    /// Recolour the row.
    pub fn change_color(&self, gui: &mut Gui, color: Color) -> bool {
        self.with(gui, |e| e.color = color)
    }

    /// Rename the row.
    pub fn change_name(&self, gui: &mut Gui, name: &str) -> bool {
        self.with(gui, |e| e.name = name.into())
    }

    /// Replace the row's text.
    pub fn change_text(&self, gui: &mut Gui, text: &str) -> bool {
        self.with(gui, |e| e.text = text.into())
    }

    /// Mark the row for removal on the next list pass.
    pub fn delete(&self, gui: &mut Gui) -> bool {
        self.with(gui, |e| e.suicide = true)
    }

    fn with(&self, gui: &mut Gui, f: impl FnOnce(&mut Entry)) -> bool {
        match gui.entry_mut(self.handle) {
            Some(e) => {
                f(e);
                true
            }
            None => false,
        }
    }
}
