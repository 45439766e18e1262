// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick input snapshots.
//!
//! The host polls its platform once per tick and fills an [`InputSnapshot`]:
//! pointer position in virtual coordinates, button and key state (held and
//! press edges), wheel delta, and text typed since the last tick. The widget
//! tree reads the snapshot and may *consume* press edges so that one edge
//! triggers at most one action.
//!
//! ```
//! use kiln_host::input::{InputSnapshot, Keys, MouseButtons};
//!
//! let mut input = InputSnapshot::at(10, 10);
//! input.press(MouseButtons::LEFT);
//! input.press_key(Keys::TAB);
//! assert!(input.mouse_pressed(MouseButtons::LEFT));
//!
//! input.consume_key(Keys::TAB);
//! assert!(!input.key_pressed(Keys::TAB));
//! assert!(input.key_held(Keys::TAB));
//!
//! // Next tick: edges clear, held state stays.
//! input.advance();
//! assert!(!input.mouse_pressed(MouseButtons::LEFT));
//! assert!(input.mouse_held(MouseButtons::LEFT));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Pointer buttons, one bit per button (up to eight).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        /// Primary button.
        const LEFT   = 1 << 0;
        /// Middle button / wheel click.
        const MIDDLE = 1 << 1;
        /// Secondary button.
        const RIGHT  = 1 << 2;
        /// First extra button.
        const X1     = 1 << 3;
        /// Second extra button.
        const X2     = 1 << 4;
        /// Sixth button.
        const B6     = 1 << 5;
        /// Seventh button.
        const B7     = 1 << 6;
        /// Eighth button.
        const B8     = 1 << 7;
    }
}

bitflags! {
    /// Keys the widget tree reacts to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Keys: u16 {
        /// Tab.
        const TAB       = 1 << 0;
        /// Return / Enter.
        const RETURN    = 1 << 1;
        /// Escape.
        const ESCAPE    = 1 << 2;
        /// Space bar.
        const SPACE     = 1 << 3;
        /// Backspace.
        const BACKSPACE = 1 << 4;
        /// Either control key.
        const CTRL      = 1 << 5;
        /// Arrow up.
        const UP        = 1 << 6;
        /// Arrow down.
        const DOWN      = 1 << 7;
        /// Arrow left.
        const LEFT      = 1 << 8;
        /// Arrow right.
        const RIGHT     = 1 << 9;
        /// Page up.
        const PAGE_UP   = 1 << 10;
        /// Page down.
        const PAGE_DOWN = 1 << 11;
    }
}

/// Input state for one tick, in virtual screen coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Pointer position this tick.
    pub mouse: (i32, i32),
    /// Pointer position on the previous tick.
    pub old_mouse: (i32, i32),
    /// Buttons currently down.
    pub buttons_held: MouseButtons,
    /// Buttons that went down this tick.
    pub buttons_pressed: MouseButtons,
    /// Buttons that went up this tick.
    pub buttons_released: MouseButtons,
    /// Buttons whose press this tick completed a double click.
    pub double_clicked: MouseButtons,
    /// Keys currently down.
    pub keys_held: Keys,
    /// Keys that went down this tick and have not been consumed.
    pub keys_pressed: Keys,
    /// Wheel ticks `(x, y)`; positive values scroll toward the end of the content.
    pub wheel: (i32, i32),
    /// Text typed since the previous tick.
    pub text: String,
}

impl InputSnapshot {
    /// An idle snapshot with the pointer at `(x, y)`.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            mouse: (x, y),
            old_mouse: (x, y),
            ..Self::default()
        }
    }

    /// Whether any of `b` is down.
    pub fn mouse_held(&self, b: MouseButtons) -> bool {
        self.buttons_held.intersects(b)
    }

    /// Whether any of `b` went down this tick (and was not consumed).
    pub fn mouse_pressed(&self, b: MouseButtons) -> bool {
        self.buttons_pressed.intersects(b)
    }

    /// Whether any of `b` went up this tick.
    pub fn mouse_released(&self, b: MouseButtons) -> bool {
        self.buttons_released.intersects(b)
    }

    /// Whether a press of `b` this tick completed a double click.
    pub fn double_click(&self, b: MouseButtons) -> bool {
        self.double_clicked.intersects(b)
    }

    /// Whether any of `k` is down.
    pub fn key_held(&self, k: Keys) -> bool {
        self.keys_held.intersects(k)
    }

    /// Whether any of `k` went down this tick and has not been consumed.
    pub fn key_pressed(&self, k: Keys) -> bool {
        self.keys_pressed.intersects(k)
    }

    /// Consume the press edge of `k` so later readers see no press.
    pub fn consume_key(&mut self, k: Keys) {
        self.keys_pressed.remove(k);
    }

    /// Consume the press edge of `b` so later readers see no press.
    pub fn consume_mouse(&mut self, b: MouseButtons) {
        self.buttons_pressed.remove(b);
        self.double_clicked.remove(b);
    }

    /// Take the text typed this tick, leaving it empty.
    pub fn take_text(&mut self) -> String {
        core::mem::take(&mut self.text)
    }

    /// Pointer motion since the previous tick.
    pub fn mouse_delta(&self) -> (i32, i32) {
        (
            self.mouse.0 - self.old_mouse.0,
            self.mouse.1 - self.old_mouse.1,
        )
    }

    /// Roll over to the next tick: edges, wheel and text clear, held state stays.
    pub fn advance(&mut self) {
        self.old_mouse = self.mouse;
        self.buttons_pressed = MouseButtons::empty();
        self.buttons_released = MouseButtons::empty();
        self.double_clicked = MouseButtons::empty();
        self.keys_pressed = Keys::empty();
        self.wheel = (0, 0);
        self.text.clear();
    }

    /// Move the pointer.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.mouse = (x, y);
    }

    /// Press `b` this tick.
    pub fn press(&mut self, b: MouseButtons) {
        self.buttons_held.insert(b);
        self.buttons_pressed.insert(b);
    }

    /// Press `b` this tick as the second click of a double click.
    pub fn double_press(&mut self, b: MouseButtons) {
        self.press(b);
        self.double_clicked.insert(b);
    }

    /// Release `b` this tick.
    pub fn release(&mut self, b: MouseButtons) {
        self.buttons_held.remove(b);
        self.buttons_released.insert(b);
    }

    /// Press `k` this tick.
    pub fn press_key(&mut self, k: Keys) {
        self.keys_held.insert(k);
        self.keys_pressed.insert(k);
    }

    /// Release `k`.
    pub fn release_key(&mut self, k: Keys) {
        self.keys_held.remove(k);
    }

    /// Add wheel ticks.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.wheel.0 += dx;
        self.wheel.1 += dy;
    }

    /// Append typed text.
    pub fn type_text(&mut self, s: &str) {
        self.text.push_str(s);
    }
}

/// The resolution-independent coordinate space widgets are laid out in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualScreen {
    /// Virtual width.
    pub w: i32,
    /// Virtual height.
    pub h: i32,
}

impl Default for VirtualScreen {
    fn default() -> Self {
        Self { w: 1280, h: 720 }
    }
}

impl VirtualScreen {
    /// Map a window pixel position into virtual coordinates.
    ///
    /// A zero-sized window maps everything to the origin.
    pub fn to_virtual(self, pos: (i32, i32), window: (u32, u32)) -> (i32, i32) {
        fn scale(v: i32, virt: i32, real: u32) -> i32 {
            if real == 0 {
                return 0;
            }
            let scaled = i64::from(v) * i64::from(virt) / i64::from(real);
            i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
        }
        (
            scale(pos.0, self.w, window.0),
            scale(pos.1, self.h, window.1),
        )
    }
}
