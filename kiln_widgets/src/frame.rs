// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frames: scrollable containers.
//!
//! A frame has a box (`size`) in its parent's content space and a content
//! rectangle (`actual`) whose `x, y` is the scroll offset and `w, h` the
//! content extents. When the content is larger than the box along an axis,
//! the frame reserves room for a scrollbar on that axis. The scroll offset
//! is kept in `0..=max(0, actual - size)` by every mutator.
//!
//! This module holds the frame's own state and geometry. Tree traversal
//! lives in [`Gui`](crate::Gui).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use kiln_host::input::{InputSnapshot, Keys, MouseButtons};
use kiln_host::script::ScriptDispatcher;
use kiln_host::{Color, Rect};

use crate::entry::EntryHandle;
use crate::style::Style;
use crate::widget::{Highlight, Placement};

bitflags! {
    /// Inputs a drop-down frame watches to decide when to close.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HeldInputs: u16 {
        /// Mouse buttons one to eight occupy bits 0 to 7.
        const MOUSE  = 0x00ff;
        /// Escape.
        const ESCAPE = 1 << 8;
        /// Tab.
        const TAB    = 1 << 9;
        /// Return.
        const RETURN = 1 << 10;
        /// Space.
        const SPACE  = 1 << 11;
    }
}

impl HeldInputs {
    /// The watched inputs held in `input`.
    pub fn sample(input: &InputSnapshot) -> Self {
        let mut held = Self::from_bits_truncate(u16::from(input.buttons_held.bits()));
        held.set(Self::ESCAPE, input.key_held(Keys::ESCAPE));
        held.set(Self::TAB, input.key_held(Keys::TAB));
        held.set(Self::RETURN, input.key_held(Keys::RETURN));
        held.set(Self::SPACE, input.key_held(Keys::SPACE));
        held
    }
}

/// Scroll axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along x.
    Horizontal,
    /// Along y.
    Vertical,
}

/// A scrollbar handle drag in progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ScrollDrag {
    pub(crate) axis: Axis,
    pub(crate) anchor_mouse: i32,
    pub(crate) anchor_scroll: i32,
}

/// A picture drawn in a frame's content space, under its widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    /// Name for lookups.
    pub name: String,
    /// Image resource passed to the render sink.
    pub path: String,
    /// Tint.
    pub color: Color,
    /// Box in the frame's content space.
    pub pos: Rect,
    /// Hidden when set.
    pub disabled: bool,
}

/// A frame's screen geometry for one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameLayout {
    /// Clipped screen box including scrollbars.
    pub(crate) full: Rect,
    /// Clipped screen box of the content, scrollbars excluded.
    pub(crate) content: Rect,
    /// Unclipped screen box of the content, scrollbars excluded.
    pub(crate) inner: Rect,
}

/// Outcome of processing a frame subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameResult {
    /// Whether the pointer is still unclaimed for siblings underneath.
    pub usable: bool,
    /// The frame asked to be removed.
    pub removed: bool,
    /// Newest highlight in the subtree.
    pub highlight: Option<Highlight>,
}

impl FrameResult {
    pub(crate) fn pass(usable: bool) -> Self {
        Self {
            usable,
            removed: false,
            highlight: None,
        }
    }
}

/// A container widget.
pub struct Frame {
    size: Rect,
    actual: Rect,
    /// Hollow frames neither draw a background nor take the pointer.
    pub hollow: bool,
    /// Bevel thickness; zero draws no bevel.
    pub border: u32,
    /// Raised rather than sunken bevel.
    pub border_high: bool,
    /// Background.
    pub color: Color,
    /// Bevel colour.
    pub border_color: Color,
    /// List text font.
    pub font: String,
    /// Hovered list row.
    pub highlight_color: Color,
    /// Selected list row.
    pub selected_entry_color: Color,
    /// Scrollbar rails.
    pub rail_color: Color,
    /// Scrollbar handles.
    pub handle_color: Color,
    /// List row height.
    pub entry_size: i32,
    /// Scrollbar thickness.
    pub slider_size: i32,
    /// Pictures under the widgets.
    pub images: Vec<Image>,
    /// Index into the list of the selected row.
    pub selected_entry: Option<usize>,
    /// Close once the inputs held after opening are all released.
    pub drop_down: bool,
    pub(crate) list: Vec<EntryHandle>,
    pub(crate) script: Option<Rc<RefCell<dyn ScriptDispatcher>>>,
    pub(crate) to_be_deleted: bool,
    pub(crate) drop_down_mask: HeldInputs,
    pub(crate) ticks: u32,
    pub(crate) drag: Option<ScrollDrag>,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("size", &self.size)
            .field("actual", &self.actual)
            .field("hollow", &self.hollow)
            .field("list", &self.list.len())
            .field("has_script", &self.script.is_some())
            .field("to_be_deleted", &self.to_be_deleted)
            .field("drop_down", &self.drop_down)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Frame {
    pub(crate) fn new(style: &Style, size: Rect) -> Self {
        Self {
            size,
            actual: Rect::new(0, 0, size.w, size.h),
            hollow: false,
            border: 0,
            border_high: true,
            color: style.frame_color,
            border_color: style.border_color,
            font: style.font.clone(),
            highlight_color: style.highlight_color,
            selected_entry_color: style.selected_entry_color,
            rail_color: style.rail_color,
            handle_color: style.handle_color,
            entry_size: style.entry_size,
            slider_size: style.slider_size,
            images: Vec::new(),
            selected_entry: None,
            drop_down: false,
            list: Vec::new(),
            script: None,
            to_be_deleted: false,
            drop_down_mask: HeldInputs::empty(),
            ticks: 0,
            drag: None,
        }
    }

    /// Box in the parent's content space.
    pub fn size(&self) -> Rect {
        self.size
    }

    /// Content rectangle: `x, y` is the scroll offset, `w, h` the extents.
    pub fn actual(&self) -> Rect {
        self.actual
    }

    /// Scroll offset.
    pub fn scroll(&self) -> (i32, i32) {
        (self.actual.x, self.actual.y)
    }

    /// Rows in the list, top to bottom.
    pub fn list(&self) -> &[EntryHandle] {
        &self.list
    }

    /// Whether the frame will be removed after its parent's next pass.
    pub fn is_doomed(&self) -> bool {
        self.to_be_deleted
    }

    /// Ticks processed since the frame was created.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Largest scroll offset along each axis.
    pub fn max_scroll(&self) -> (i32, i32) {
        (
            (self.actual.w - self.size.w).max(0),
            (self.actual.h - self.size.h).max(0),
        )
    }

    /// Move and resize the box; the scroll offset is re-clamped.
    pub fn set_size(&mut self, size: Rect) {
        self.size = size;
        self.clamp_scroll();
    }

    /// Set the content extents; the scroll offset is re-clamped.
    pub fn set_actual_size(&mut self, w: i32, h: i32) {
        self.actual.w = w.max(0);
        self.actual.h = h.max(0);
        self.clamp_scroll();
    }

    /// Scroll to `(x, y)`, clamped.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.actual.x = x;
        self.actual.y = y;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let (mx, my) = self.max_scroll();
        self.actual.x = self.actual.x.clamp(0, mx);
        self.actual.y = self.actual.y.clamp(0, my);
    }

    /// Scroll along `axis` by `delta`, clamped. Returns whether the offset changed.
    pub fn scroll_by(&mut self, axis: Axis, delta: i32) -> bool {
        let before = self.scroll();
        match axis {
            Axis::Horizontal => self.scroll_to(self.actual.x.saturating_add(delta), self.actual.y),
            Axis::Vertical => self.scroll_to(self.actual.x, self.actual.y.saturating_add(delta)),
        }
        let changed = self.scroll() != before;
        if changed {
            tracing::trace!(from = ?before, to = ?self.scroll(), "frame scrolled");
        }
        changed
    }

    /// Content wider than the box.
    pub fn has_h_bar(&self) -> bool {
        self.actual.w > self.size.w
    }

    /// Content taller than the box.
    pub fn has_v_bar(&self) -> bool {
        self.actual.h > self.size.h
    }

    /// Distance one wheel tick or rail click scrolls along `axis`.
    pub fn wheel_step(&self, axis: Axis) -> i32 {
        let dim = match axis {
            Axis::Horizontal => self.size.w,
            Axis::Vertical => self.size.h,
        };
        (self.entry_size * 4).min(dim)
    }

    pub(crate) fn layout(&self, at: Placement) -> FrameLayout {
        let full = at.view(self.size);
        let mut content = full;
        let mut inner = at.origin(self.size);
        if self.has_h_bar() {
            content.h -= self.slider_size;
            inner.h -= self.slider_size;
        }
        if self.has_v_bar() {
            content.w -= self.slider_size;
            inner.w -= self.slider_size;
        }
        FrameLayout {
            full,
            content,
            inner,
        }
    }

    /// Placement handed to the frame's children.
    ///
    /// The part of the frame hidden past its parent's near edge is added to
    /// the scroll offset, so children stay put relative to the frame.
    pub(crate) fn child_placement(&self, layout: &FrameLayout) -> Placement {
        let hidden_x = layout.content.x - layout.inner.x;
        let hidden_y = layout.content.y - layout.inner.y;
        Placement {
            parent: layout.content,
            scroll: (
                self.actual.x.saturating_add(hidden_x),
                self.actual.y.saturating_add(hidden_y),
            ),
        }
    }

    pub(crate) fn rail(&self, layout: &FrameLayout, axis: Axis) -> Rect {
        let c = layout.content;
        match axis {
            Axis::Horizontal => Rect::new(c.x, c.y + c.h, c.w, self.slider_size),
            Axis::Vertical => Rect::new(c.x + c.w, c.y, self.slider_size, c.h),
        }
    }

    /// Rail pixels per content pixel along `axis`.
    fn win_factor(&self, rail: Rect, axis: Axis) -> f64 {
        let (visible, actual) = match axis {
            Axis::Horizontal => (rail.w, self.actual.w),
            Axis::Vertical => (rail.h, self.actual.h),
        };
        if actual <= 0 {
            return 1.0;
        }
        f64::from(visible) / f64::from(actual)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handle extents are bounded by the rail."
    )]
    pub(crate) fn handle(&self, rail: Rect, axis: Axis) -> Rect {
        let factor = self.win_factor(rail, axis);
        match axis {
            Axis::Horizontal => {
                let offset = (f64::from(self.actual.x) * factor).round() as i32;
                let len = (f64::from(self.size.w) * factor).round() as i32;
                Rect::new(rail.x + offset, rail.y, len.max(1), rail.h)
            }
            Axis::Vertical => {
                let offset = (f64::from(self.actual.y) * factor).round() as i32;
                let len = (f64::from(self.size.h) * factor).round() as i32;
                Rect::new(rail.x, rail.y + offset, rail.w, len.max(1))
            }
        }
    }

    fn bars(&self) -> impl Iterator<Item = Axis> + use<> {
        let h = self.has_h_bar().then_some(Axis::Horizontal);
        let v = self.has_v_bar().then_some(Axis::Vertical);
        h.into_iter().chain(v)
    }

    /// Wheel and scrollbar handling.
    ///
    /// Returns true when a scrollbar took the pointer this tick. A drag in
    /// progress keeps the pointer until the button is released, whatever `usable` says.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Scroll deltas are bounded by the content extents."
    )]
    pub(crate) fn process_scroll(
        &mut self,
        layout: &FrameLayout,
        input: &mut InputSnapshot,
        usable: bool,
    ) -> bool {
        if let Some(drag) = self.drag {
            if !input.mouse_held(MouseButtons::LEFT) {
                self.drag = None;
                return false;
            }
            let rail = self.rail(layout, drag.axis);
            let factor = self.win_factor(rail, drag.axis);
            let mouse = match drag.axis {
                Axis::Horizontal => input.mouse.0,
                Axis::Vertical => input.mouse.1,
            };
            let delta = (f64::from(mouse - drag.anchor_mouse) / factor).round() as i32;
            let target = drag.anchor_scroll.saturating_add(delta);
            match drag.axis {
                Axis::Horizontal => self.scroll_to(target, self.actual.y),
                Axis::Vertical => self.scroll_to(self.actual.x, target),
            }
            return true;
        }
        if !usable || self.hollow {
            return false;
        }
        let (mx, my) = input.mouse;
        if !layout.full.contains(mx, my) {
            return false;
        }

        let (wx, wy) = input.wheel;
        if wx != 0 {
            let step = wx.saturating_mul(self.wheel_step(Axis::Horizontal));
            self.scroll_by(Axis::Horizontal, step);
        }
        if wy != 0 {
            let axis = if self.has_v_bar() {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
            self.scroll_by(axis, wy.saturating_mul(self.wheel_step(axis)));
        }

        if !input.mouse_pressed(MouseButtons::LEFT) {
            return false;
        }
        for axis in self.bars() {
            let rail = self.rail(layout, axis);
            if !rail.contains(mx, my) {
                continue;
            }
            input.consume_mouse(MouseButtons::LEFT);
            let handle = self.handle(rail, axis);
            let (pos, handle_start, handle_end, scroll) = match axis {
                Axis::Horizontal => (mx, handle.x, handle.right(), self.actual.x),
                Axis::Vertical => (my, handle.y, handle.bottom(), self.actual.y),
            };
            if pos < handle_start {
                self.scroll_by(axis, -self.wheel_step(axis));
            } else if pos >= handle_end {
                self.scroll_by(axis, self.wheel_step(axis));
            } else {
                self.drag = Some(ScrollDrag {
                    axis,
                    anchor_mouse: pos,
                    anchor_scroll: scroll,
                });
            }
            return true;
        }
        false
    }

    /// Screen box of list row `index`, unclipped.
    pub(crate) fn row_rect(&self, layout: &FrameLayout, index: usize) -> Rect {
        let c = layout.inner;
        let row = i32::try_from(index).unwrap_or(i32::MAX);
        Rect::new(
            c.x,
            c.y.saturating_add(self.entry_size.saturating_mul(row)) - self.actual.y,
            c.w,
            self.entry_size,
        )
    }

    /// Advance the drop-down close latch with the inputs held this tick.
    ///
    /// Returns true on the tick the frame marks itself for deletion.
    pub(crate) fn postprocess_drop_down(&mut self, held: HeldInputs) -> bool {
        if !self.drop_down || self.to_be_deleted || self.ticks == 0 {
            return false;
        }
        if self.drop_down_mask.is_empty() {
            self.drop_down_mask = held;
            return false;
        }
        self.drop_down_mask &= held;
        if self.drop_down_mask.is_empty() {
            self.to_be_deleted = true;
            return true;
        }
        false
    }
}
