// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Push, toggle, checkbox and drop-down buttons.

use std::fmt;
use std::rc::Rc;

use kiln_host::input::{InputSnapshot, MouseButtons};
use kiln_host::render::RenderSink;
use kiln_host::{Color, Rect};

use crate::gui::Gui;
use crate::paint::{self, Justify};
use crate::style::Style;
use crate::widget::{Callback, Placement, WidgetBase, WidgetFlags, WidgetId};

/// How a button reacts to clicks and how it is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonStyle {
    /// Momentary push button.
    #[default]
    Normal,
    /// Stays down after a click until clicked again.
    Toggle,
    /// Toggle drawn as a box with a check mark.
    Checkbox,
    /// Push button drawn with a drop-down marker.
    Dropdown,
}

/// A clickable button.
pub struct Button {
    /// Label.
    pub text: String,
    /// Image drawn centered under the label; empty for none.
    pub icon: String,
    /// Label font.
    pub font: String,
    /// Tooltip shown after hovering.
    pub tooltip: String,
    /// Bevel thickness; zero draws no bevel.
    pub border: u32,
    /// Face colour.
    pub color: Color,
    /// Face colour while hovered.
    pub highlight_color: Color,
    /// Face colour while pressed or toggled on.
    pub pressed_color: Color,
    /// Label colour.
    pub text_color: Color,
    /// Bevel colour.
    pub border_color: Color,
    /// Behaviour.
    pub style: ButtonStyle,
    /// On/off state of toggle and checkbox buttons.
    pub toggled: bool,
    /// Box in the parent's content space.
    pub size: Rect,
    pub(crate) callback: Option<Callback>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("style", &self.style)
            .field("toggled", &self.toggled)
            .field("size", &self.size)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

/// What a button did this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonResult {
    /// Pointer is over the button and input was usable.
    pub highlighted: bool,
    /// The button is held down.
    pub pressed: bool,
    /// The pointer was released over the button after pressing it.
    pub clicked: bool,
    /// When the pointer entered.
    pub highlight_time: u64,
    /// Tooltip to show while highlighted.
    pub tooltip: String,
}

impl Button {
    pub(crate) fn new(style: &Style) -> Self {
        Self {
            text: String::new(),
            icon: String::new(),
            font: style.font.clone(),
            tooltip: String::new(),
            border: 2,
            color: style.button_color,
            highlight_color: style.highlight_color,
            pressed_color: style.pressed_color,
            text_color: style.text_color,
            border_color: style.border_color,
            style: ButtonStyle::Normal,
            toggled: false,
            size: Rect::ZERO,
            callback: None,
        }
    }

    /// Run `f` when the button is activated.
    pub fn set_callback(&mut self, f: impl Fn(&mut Gui, WidgetId) + 'static) {
        self.callback = Some(Rc::new(f));
    }

    /// Drop the native callback; activation falls back to script dispatch.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Whether the button should look pushed in.
    pub fn is_down(&self, base: &WidgetBase) -> bool {
        base.is_pressed()
            || (matches!(self.style, ButtonStyle::Toggle | ButtonStyle::Checkbox) && self.toggled)
    }

    /// Flip the toggle state of toggle and checkbox buttons.
    pub(crate) fn toggle(&mut self) {
        if matches!(self.style, ButtonStyle::Toggle | ButtonStyle::Checkbox) {
            self.toggled = !self.toggled;
        }
    }

    pub(crate) fn process(
        &mut self,
        base: &mut WidgetBase,
        at: Placement,
        usable: bool,
        input: &InputSnapshot,
        now: u64,
    ) -> ButtonResult {
        let rect = at.view(self.size);
        let over = usable && !rect.is_empty() && rect.contains(input.mouse.0, input.mouse.1);
        base.track_hover(over, now);
        if !over {
            if !input.mouse_held(MouseButtons::LEFT) {
                base.flags.remove(WidgetFlags::PRESSED);
            }
            return ButtonResult::default();
        }

        let mut result = ButtonResult {
            highlighted: true,
            highlight_time: base.highlight_time,
            tooltip: self.tooltip.clone(),
            ..ButtonResult::default()
        };
        if input.mouse_held(MouseButtons::LEFT) {
            if input.mouse_pressed(MouseButtons::LEFT) {
                base.flags.insert(WidgetFlags::PRESSED);
            }
            result.pressed = base.is_pressed();
        } else if base.is_pressed() {
            base.flags.remove(WidgetFlags::PRESSED);
            result.clicked = true;
        }
        result
    }

    pub(crate) fn draw(&self, base: &WidgetBase, at: Placement, r: &mut dyn RenderSink) {
        let rect = at.view(self.size);
        if rect.is_empty() {
            return;
        }
        let down = self.is_down(base);
        let area = at.origin(self.size);

        let face = if self.style == ButtonStyle::Checkbox {
            // Checkboxes draw a square box on the left and the label beside it.
            let side = area.h.min(area.w);
            Rect::new(area.x, area.y, side, side)
        } else {
            area
        };
        let face_color = if down && self.style != ButtonStyle::Checkbox {
            self.pressed_color
        } else if base.is_highlighted() {
            self.highlight_color
        } else {
            self.color
        };
        let shown = face.intersect(&rect);
        if !shown.is_empty() {
            r.fill_rect(shown.to_kurbo(), face_color);
            if self.border > 0 {
                r.bevel(shown.to_kurbo(), self.border, self.border_color, !down);
            }
        }
        if self.style == ButtonStyle::Checkbox && self.toggled {
            let inset = face.w / 4;
            let mark = Rect::new(
                face.x + inset,
                face.y + inset,
                face.w - 2 * inset,
                face.h - 2 * inset,
            )
            .intersect(&rect);
            if !mark.is_empty() {
                r.fill_rect(mark.to_kurbo(), self.text_color);
            }
        }
        if self.style == ButtonStyle::Dropdown {
            let side = area.h / 3;
            let marker =
                Rect::new(area.right() - side * 2, area.y + side, side, side).intersect(&rect);
            if !marker.is_empty() {
                r.fill_rect(marker.to_kurbo(), self.text_color);
            }
        }

        if !self.icon.is_empty() {
            paint::image_clipped(r, &self.icon, area, rect, Color::WHITE);
        }
        let (label_area, hjustify) = if self.style == ButtonStyle::Checkbox {
            let pad = face.w + 4;
            (Rect::new(area.x + pad, area.y, area.w - pad, area.h), Justify::Left)
        } else {
            (area, Justify::Center)
        };
        paint::text_clipped(
            r,
            &self.text,
            &self.font,
            self.text_color,
            label_area,
            rect,
            hjustify,
            Justify::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::testing::{Op, Recorder};

    fn at() -> Placement {
        Placement {
            parent: Rect::new(0, 0, 200, 200),
            scroll: (0, 0),
        }
    }

    fn button() -> (Button, WidgetBase) {
        let mut b = Button::new(&Style::default());
        b.size = Rect::new(10, 10, 50, 20);
        (b, WidgetBase::new("ok", 0, None))
    }

    #[test]
    fn click_needs_press_and_release_inside() {
        let (mut b, mut base) = button();
        let mut input = InputSnapshot::at(20, 15);
        input.press(MouseButtons::LEFT);
        let r = b.process(&mut base, at(), true, &input, 1);
        assert!(r.highlighted && r.pressed && !r.clicked);

        input.advance();
        input.release(MouseButtons::LEFT);
        let r = b.process(&mut base, at(), true, &input, 2);
        assert!(r.clicked);
        assert!(!base.is_pressed());
        assert_eq!(r.highlight_time, 1);
    }

    #[test]
    fn press_outside_then_release_inside_is_not_a_click() {
        let (mut b, mut base) = button();
        let mut input = InputSnapshot::at(150, 150);
        input.press(MouseButtons::LEFT);
        b.process(&mut base, at(), true, &input, 1);
        input.advance();
        input.move_to(20, 15);
        input.release(MouseButtons::LEFT);
        let r = b.process(&mut base, at(), true, &input, 2);
        assert!(r.highlighted && !r.clicked);
    }

    #[test]
    fn unusable_input_is_ignored() {
        let (mut b, mut base) = button();
        let mut input = InputSnapshot::at(20, 15);
        input.press(MouseButtons::LEFT);
        let r = b.process(&mut base, at(), false, &input, 1);
        assert_eq!(r, ButtonResult::default());
        assert!(!base.is_highlighted());
    }

    #[test]
    fn scrolled_out_button_is_not_hit() {
        let (mut b, mut base) = button();
        let input = InputSnapshot::at(20, 15);
        let scrolled = Placement {
            parent: Rect::new(0, 0, 200, 200),
            scroll: (0, 40),
        };
        let r = b.process(&mut base, scrolled, true, &input, 1);
        assert!(!r.highlighted);
    }

    #[test]
    fn toggle_draws_down_after_toggle() {
        let (mut b, base) = button();
        b.style = ButtonStyle::Toggle;
        b.text = "Go".into();
        assert!(!b.is_down(&base));
        b.toggle();
        assert!(b.is_down(&base));
        let mut r = Recorder::default();
        b.draw(&base, at(), &mut r);
        assert!(r.ops.contains(&Op::Fill(
            Rect::new(10, 10, 50, 20).to_kurbo(),
            b.pressed_color
        )));
        assert_eq!(r.texts(), ["Go"]);
    }
}
