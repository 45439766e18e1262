// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal value sliders.

use std::fmt;
use std::rc::Rc;

use kiln_host::input::{InputSnapshot, MouseButtons};
use kiln_host::render::RenderSink;
use kiln_host::{Color, Rect};

use crate::gui::Gui;
use crate::style::Style;
use crate::widget::{Callback, Placement, WidgetBase, WidgetFlags, WidgetId};

/// A handle dragged along a rail to pick a value in `[min_value, max_value]`.
pub struct Slider {
    value: f64,
    min_value: f64,
    max_value: f64,
    /// Rail box in the parent's content space.
    pub rail_size: Rect,
    /// Handle extents; its position is derived from the value.
    pub handle_size: Rect,
    /// Rail colour.
    pub rail_color: Color,
    /// Handle colour.
    pub handle_color: Color,
    /// Bevel colour of the handle.
    pub border_color: Color,
    /// Tooltip shown after hovering.
    pub tooltip: String,
    pub(crate) callback: Option<Callback>,
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.value)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("rail_size", &self.rail_size)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

/// What a slider did this tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliderResult {
    /// Pointer is over the rail or handle and input was usable.
    pub highlighted: bool,
    /// The handle is being dragged.
    pub pressed: bool,
    /// The value changed this tick.
    pub clicked: bool,
    /// When the pointer entered.
    pub highlight_time: u64,
    /// Tooltip to show while highlighted.
    pub tooltip: String,
}

impl Slider {
    pub(crate) fn new(style: &Style, min_value: f64, max_value: f64) -> Self {
        let (min_value, max_value) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        Self {
            value: min_value,
            min_value,
            max_value,
            rail_size: Rect::ZERO,
            handle_size: Rect::new(0, 0, style.slider_size / 2, style.slider_size),
            rail_color: style.rail_color,
            handle_color: style.handle_color,
            border_color: style.border_color,
            tooltip: String::new(),
            callback: None,
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper bound.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Set the value, clamped into range.
    pub fn set_value(&mut self, v: f64) {
        self.value = v.clamp(self.min_value, self.max_value);
    }

    /// Change the range; the value is clamped into it.
    pub fn set_range(&mut self, min_value: f64, max_value: f64) {
        if min_value <= max_value {
            self.min_value = min_value;
            self.max_value = max_value;
        } else {
            self.min_value = max_value;
            self.max_value = min_value;
        }
        self.set_value(self.value);
    }

    /// Run `f` when the value changes through the pointer.
    pub fn set_callback(&mut self, f: impl Fn(&mut Gui, WidgetId) + 'static) {
        self.callback = Some(Rc::new(f));
    }

    /// Position of the value along the rail, from `rail.x`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The offset is bounded by the rail width."
    )]
    fn handle_offset(&self) -> i32 {
        let span = self.max_value - self.min_value;
        if span <= 0.0 {
            return 0;
        }
        let t = (self.value - self.min_value) / span;
        (t * f64::from(self.rail_size.w)).round() as i32
    }

    /// Handle box in the parent's content space, centered on the value.
    pub fn handle_rect(&self) -> Rect {
        let rail = self.rail_size;
        let (w, h) = (self.handle_size.w, self.handle_size.h);
        Rect::new(
            rail.x + self.handle_offset() - w / 2,
            rail.y + rail.h / 2 - h / 2,
            w,
            h,
        )
    }

    /// Value under screen x for a rail whose unclipped left edge is `rail_x`.
    pub fn value_at(&self, rail_x: i32, x: i32) -> f64 {
        if self.rail_size.w <= 0 {
            return self.min_value;
        }
        let t = f64::from(x - rail_x) / f64::from(self.rail_size.w);
        (self.min_value + t * (self.max_value - self.min_value))
            .clamp(self.min_value, self.max_value)
    }

    pub(crate) fn process(
        &mut self,
        base: &mut WidgetBase,
        at: Placement,
        usable: bool,
        input: &InputSnapshot,
        now: u64,
    ) -> SliderResult {
        let rail = at.view(self.rail_size);
        let handle = at.view(self.handle_rect());
        let (mx, my) = input.mouse;
        let over = usable
            && ((!rail.is_empty() && rail.contains(mx, my))
                || (!handle.is_empty() && handle.contains(mx, my)));
        base.track_hover(over, now);

        let mut result = SliderResult::default();
        if over {
            result.highlighted = true;
            result.highlight_time = base.highlight_time;
            result.tooltip = self.tooltip.clone();
            if input.mouse_pressed(MouseButtons::LEFT) {
                base.flags.insert(WidgetFlags::PRESSED);
            }
        }
        if !input.mouse_held(MouseButtons::LEFT) {
            base.flags.remove(WidgetFlags::PRESSED);
        }
        if base.is_pressed() {
            // Dragging keeps the pointer even when something else claimed it.
            result.pressed = true;
            let old = self.value;
            self.value = self.value_at(at.origin(self.rail_size).x, mx);
            result.clicked = self.value != old;
        }
        result
    }

    pub(crate) fn draw(&self, base: &WidgetBase, at: Placement, r: &mut dyn RenderSink) {
        let rail = at.view(self.rail_size);
        if !rail.is_empty() {
            r.fill_rect(rail.to_kurbo(), self.rail_color);
        }
        let handle = at.view(self.handle_rect());
        if !handle.is_empty() {
            r.fill_rect(handle.to_kurbo(), self.handle_color);
            r.bevel(handle.to_kurbo(), 1, self.border_color, !base.is_pressed());
        }
    }
}
