// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kiln Host: the contracts between the Kiln widget tree and the engine it lives in.
//!
//! The widget tree is a pure state machine over a tree of frames. Everything
//! platform-specific reaches it through the types in this crate:
//!
//! - [`input::InputSnapshot`]: pointer, buttons, keys, wheel and typed text for one tick.
//! - [`render::RenderSink`]: filled rects, bevels, text and images.
//! - [`script::ScriptDispatcher`]: dispatch-by-name for widgets without native callbacks.
//! - [`platform::Clock`]: millisecond timestamps for hover and tooltip timing.
//! - [`platform::TextInputPlatform`]: toggles the platform's text-input mode.
//!
//! Geometry is integer ([`Rect`]) in a virtual, resolution-independent space;
//! [`input::VirtualScreen`] maps window pixels into it. Rectangles are handed
//! to the render sink as Kurbo rectangles.
//!
//! ## Minimal usage
//!
//! ```
//! use kiln_host::{Rect, input::InputSnapshot};
//!
//! let button = Rect::new(10, 10, 80, 20);
//! let input = InputSnapshot::at(15, 12);
//! assert!(button.contains(input.mouse.0, input.mouse.1));
//! ```

pub mod geometry;
pub mod input;
pub mod platform;
pub mod render;
pub mod script;

pub use geometry::{Color, Rect};
