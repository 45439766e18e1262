// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line text fields.
//!
//! A field is *selected* when it has navigation focus and *activated*
//! (`WidgetFlags::ACTIVATED`) while it captures typed text. Only one field per
//! [`Gui`] captures text at a time; the `Gui` tracks which one.

use std::fmt;
use std::rc::Rc;

use kiln_host::input::{InputSnapshot, Keys, MouseButtons};
use kiln_host::render::RenderSink;
use kiln_host::{Color, Rect};

use crate::gui::Gui;
use crate::paint::{self, Justify};
use crate::style::Style;
use crate::widget::{Callback, Placement, WidgetBase, WidgetFlags, WidgetId};

const CURSOR_WIDTH: i32 = 2;

/// An editable or read-only line of text.
pub struct Field {
    text: String,
    capacity: usize,
    /// Horizontal placement of the text.
    pub hjustify: Justify,
    /// Vertical placement of the text.
    pub vjustify: Justify,
    /// Whether clicking the field starts text input.
    pub editable: bool,
    /// Accept only digits, `-` and `.`.
    pub numbers_only: bool,
    /// Keep the end of overlong text visible.
    pub scroll: bool,
    /// Frame holding the field that Tab moves to; empty means this field's frame.
    pub tab_dest_frame: String,
    /// Field that Tab moves to; empty disables tabbing.
    pub tab_dest_field: String,
    /// The next typed batch replaces the whole buffer.
    pub select_all: bool,
    /// Box in the parent's content space.
    pub size: Rect,
    /// Text font.
    pub font: String,
    /// Tooltip shown after hovering.
    pub tooltip: String,
    /// Background; transparent draws none.
    pub color: Color,
    /// Text colour.
    pub text_color: Color,
    /// Background of selected-all text.
    pub select_color: Color,
    pub(crate) callback: Option<Callback>,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("text", &self.text)
            .field("capacity", &self.capacity)
            .field("editable", &self.editable)
            .field("tab_dest_frame", &self.tab_dest_frame)
            .field("tab_dest_field", &self.tab_dest_field)
            .field("size", &self.size)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

/// What a field did this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldResult {
    /// Pointer is over the field and input was usable.
    pub highlighted: bool,
    /// When the pointer entered.
    pub highlight_time: u64,
    /// Tooltip to show while highlighted.
    pub tooltip: String,
    /// The field was pressed this tick.
    pub clicked: bool,
    /// The pointer was pressed somewhere else this tick.
    pub clicked_outside: bool,
    /// Return was pressed while the field captured text.
    pub entered: bool,
    /// Tab was pressed while the field was selected.
    pub tabbed: bool,
}

impl Field {
    pub(crate) fn new(style: &Style, capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
            hjustify: Justify::Left,
            vjustify: Justify::Center,
            editable: true,
            numbers_only: false,
            scroll: true,
            tab_dest_frame: String::new(),
            tab_dest_field: String::new(),
            select_all: false,
            size: Rect::ZERO,
            font: style.font.clone(),
            tooltip: String::new(),
            color: style.field_color,
            text_color: style.text_color,
            select_color: style.highlight_color,
            callback: None,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maximum text length in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace the text, truncated to capacity on a character boundary.
    pub fn set_text(&mut self, text: &str) {
        let mut end = text.len().min(self.capacity);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text = text[..end].to_owned();
    }

    /// Run `f` when Return or Tab fires the field.
    pub fn set_callback(&mut self, f: impl Fn(&mut Gui, WidgetId) + 'static) {
        self.callback = Some(Rc::new(f));
    }

    fn accepts(&self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        !self.numbers_only || c.is_ascii_digit() || c == '-' || c == '.'
    }

    /// Apply one tick of typing.
    pub(crate) fn apply_edit(&mut self, typed: &str, backspace: bool) {
        if typed.is_empty() && !backspace {
            return;
        }
        if self.select_all {
            self.text.clear();
            self.select_all = false;
        } else if backspace {
            self.text.pop();
        }
        for c in typed.chars() {
            if !self.accepts(c) {
                continue;
            }
            if self.text.len() + c.len_utf8() > self.capacity {
                break;
            }
            self.text.push(c);
        }
    }

    #[allow(
        clippy::too_many_arguments,
        reason = "Focus and the tab latch are per-tick state owned by the Gui."
    )]
    pub(crate) fn process(
        &mut self,
        base: &mut WidgetBase,
        at: Placement,
        usable: bool,
        input: &mut InputSnapshot,
        owns_focus: bool,
        tab: Keys,
        tabbing: &mut bool,
        now: u64,
    ) -> FieldResult {
        if !owns_focus {
            base.flags.remove(WidgetFlags::ACTIVATED);
        }
        let rect = at.view(self.size);
        let over = usable && !rect.is_empty() && rect.contains(input.mouse.0, input.mouse.1);
        base.track_hover(over, now);

        let mut result = FieldResult::default();
        if over {
            result.highlighted = true;
            result.highlight_time = base.highlight_time;
            result.tooltip = self.tooltip.clone();
        }
        if input.mouse_pressed(MouseButtons::LEFT) {
            if over {
                result.clicked = true;
                if input.double_click(MouseButtons::LEFT) && self.editable {
                    self.select_all = true;
                }
                input.consume_mouse(MouseButtons::LEFT);
            } else {
                result.clicked_outside = true;
            }
        }

        if base.flags.contains(WidgetFlags::ACTIVATED) {
            let typed = input.take_text();
            let backspace = input.key_pressed(Keys::BACKSPACE);
            if backspace {
                input.consume_key(Keys::BACKSPACE);
            }
            self.apply_edit(&typed, backspace);
            if input.key_pressed(Keys::RETURN) {
                input.consume_key(Keys::RETURN);
                result.entered = true;
            }
        }

        if base.is_selected()
            && !self.tab_dest_field.is_empty()
            && input.key_held(tab)
            && !*tabbing
        {
            *tabbing = true;
            input.consume_key(tab);
            result.tabbed = true;
        }
        result
    }

    pub(crate) fn draw(&self, base: &WidgetBase, at: Placement, r: &mut dyn RenderSink) {
        let rect = at.view(self.size);
        if rect.is_empty() {
            return;
        }
        let area = at.origin(self.size);
        if !self.color.is_transparent() {
            r.fill_rect(rect.to_kurbo(), self.color);
        }
        let activated = base.flags.contains(WidgetFlags::ACTIVATED);

        let hjustify = match r.measure_text(&self.text, &self.font) {
            Some(m) if self.scroll && m.w > area.w => Justify::Right,
            _ => self.hjustify,
        };
        let Some(placed) = paint::text_clipped(
            r,
            &self.text,
            &self.font,
            self.text_color,
            area,
            rect,
            hjustify,
            self.vjustify,
        ) else {
            if activated {
                let x = area.x + hjustify.offset(area.w, 0);
                let cursor = Rect::new(x, area.y + 2, CURSOR_WIDTH, area.h - 4).intersect(&rect);
                if !cursor.is_empty() {
                    r.fill_rect(cursor.to_kurbo(), self.text_color);
                }
            }
            return;
        };
        if activated && self.select_all {
            let band = placed.intersect(&rect);
            if !band.is_empty() {
                r.fill_rect(band.to_kurbo(), self.select_color);
            }
            // Redraw over the selection band.
            paint::text_clipped(
                r,
                &self.text,
                &self.font,
                self.text_color,
                area,
                rect,
                hjustify,
                self.vjustify,
            );
        }
        if activated {
            let cursor =
                Rect::new(placed.right(), placed.y, CURSOR_WIDTH, placed.h).intersect(&rect);
            if !cursor.is_empty() {
                r.fill_rect(cursor.to_kurbo(), self.text_color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::testing::Recorder;

    fn at() -> Placement {
        Placement {
            parent: Rect::new(0, 0, 300, 300),
            scroll: (0, 0),
        }
    }

    fn field(capacity: usize) -> (Field, WidgetBase) {
        let mut f = Field::new(&Style::default(), capacity);
        f.size = Rect::new(0, 0, 100, 20);
        (f, WidgetBase::new("f", 0, None))
    }

    #[test]
    fn typing_respects_capacity_and_filter() {
        let (mut f, _) = field(4);
        f.apply_edit("abcdef", false);
        assert_eq!(f.text(), "abcd");

        let (mut n, _) = field(8);
        n.numbers_only = true;
        n.apply_edit("1a-2.b3", false);
        assert_eq!(n.text(), "1-2.3");
        n.apply_edit("", true);
        assert_eq!(n.text(), "1-2.");
    }

    #[test]
    fn select_all_replaces_on_next_batch() {
        let (mut f, _) = field(16);
        f.set_text("old text");
        f.select_all = true;
        f.apply_edit("", false);
        assert!(f.select_all, "an empty batch keeps the selection");
        f.apply_edit("new", false);
        assert_eq!(f.text(), "new");
        assert!(!f.select_all);
    }

    #[test]
    fn set_text_truncates_on_char_boundary() {
        let (mut f, _) = field(3);
        f.set_text("aé!");
        assert_eq!(f.text(), "aé");
    }

    #[test]
    fn double_click_selects_all() {
        let (mut f, mut base) = field(16);
        let mut input = InputSnapshot::at(10, 10);
        input.double_press(MouseButtons::LEFT);
        let mut tabbing = false;
        let r = f.process(&mut base, at(), true, &mut input, false, Keys::TAB, &mut tabbing, 5);
        assert!(r.clicked && r.highlighted);
        assert!(f.select_all);
        assert!(!input.mouse_pressed(MouseButtons::LEFT));
    }

    #[test]
    fn activated_field_takes_text_and_return() {
        let (mut f, mut base) = field(16);
        base.flags.insert(WidgetFlags::ACTIVATED);
        let mut input = InputSnapshot::at(500, 500);
        input.type_text("hi");
        input.press_key(Keys::RETURN);
        let mut tabbing = false;
        let r = f.process(&mut base, at(), true, &mut input, true, Keys::TAB, &mut tabbing, 0);
        assert_eq!(f.text(), "hi");
        assert!(r.entered);
        assert!(!input.key_pressed(Keys::RETURN));
        assert!(input.text.is_empty());
    }

    #[test]
    fn losing_focus_deactivates() {
        let (mut f, mut base) = field(16);
        base.flags.insert(WidgetFlags::ACTIVATED);
        let mut input = InputSnapshot::at(500, 500);
        input.type_text("x");
        let mut tabbing = false;
        f.process(&mut base, at(), true, &mut input, false, Keys::TAB, &mut tabbing, 0);
        assert!(!base.flags.contains(WidgetFlags::ACTIVATED));
        assert_eq!(f.text(), "");
    }

    #[test]
    fn tab_fires_once_per_latch() {
        let (mut f, mut base) = field(16);
        base.flags.insert(WidgetFlags::SELECTED);
        let mut input = InputSnapshot::at(500, 500);
        input.press_key(Keys::TAB);
        let mut tabbing = false;
        let r = f.process(&mut base, at(), true, &mut input, false, Keys::TAB, &mut tabbing, 0);
        assert!(!r.tabbed && !tabbing, "no destination, no tab");

        f.tab_dest_field = "next".into();
        let r = f.process(&mut base, at(), true, &mut input, false, Keys::TAB, &mut tabbing, 0);
        assert!(r.tabbed && tabbing);

        input.advance();
        let r = f.process(&mut base, at(), true, &mut input, false, Keys::TAB, &mut tabbing, 1);
        assert!(!r.tabbed, "held Tab must not fire again");
    }

    #[test]
    fn tab_follows_the_bound_key() {
        let (mut f, mut base) = field(16);
        base.flags.insert(WidgetFlags::SELECTED);
        f.tab_dest_field = "next".into();
        let mut input = InputSnapshot::at(500, 500);
        input.press_key(Keys::TAB);
        let mut tabbing = false;
        let r = f.process(&mut base, at(), true, &mut input, false, Keys::SPACE, &mut tabbing, 0);
        assert!(!r.tabbed && !tabbing);
        assert!(input.key_pressed(Keys::TAB));

        input.press_key(Keys::SPACE);
        let r = f.process(&mut base, at(), true, &mut input, false, Keys::SPACE, &mut tabbing, 0);
        assert!(r.tabbed && tabbing);
        assert!(!input.key_pressed(Keys::SPACE));
    }

    #[test]
    fn long_text_scrolls_to_its_end() {
        let (mut f, base) = field(64);
        f.size = Rect::new(0, 0, 40, 20);
        f.set_text("0123456789");
        let mut r = Recorder::default();
        f.draw(&base, at(), &mut r);
        let drawn = r
            .ops
            .iter()
            .find_map(|op| match op {
                crate::paint::testing::Op::Text(_, src, _) => Some(*src),
                _ => None,
            })
            .unwrap();
        // 80 px of text in a 40 px box: the last 40 px are shown.
        assert_eq!(drawn.x0, 40.0);
    }
}
