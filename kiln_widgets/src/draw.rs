// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draw pass.
//!
//! Drawing reads the tree and never changes it. Within a frame the order is
//! background, images, list rows, fields, buttons, sliders, scrollbars, then
//! child frames; siblings draw in insertion order so later ones end up on top.

use kiln_host::render::RenderSink;
use kiln_host::Rect;

use crate::frame::{Axis, Frame, FrameLayout};
use crate::gui::Gui;
use crate::paint::{self, Justify};
use crate::widget::{Node, Placement, Widget, WidgetFlags, WidgetId};

const ROW_PAD: i32 = 4;
const TOOLTIP_OFFSET: i32 = 16;
const TOOLTIP_PAD: i32 = 4;

impl Gui {
    /// Draw the tree, then the tooltip of the newest highlight once it has
    /// been hovered for [`Style::tooltip_delay_ms`](crate::Style::tooltip_delay_ms).
    pub fn draw(&self, r: &mut dyn RenderSink) {
        self.draw_frame(self.root(), self.root_placement(), r);
        self.draw_tooltip(r);
    }

    fn draw_frame(&self, id: WidgetId, at: Placement, r: &mut dyn RenderSink) {
        let Some(Node {
            base,
            widget: Widget::Frame(frame),
        }) = self.nodes.get(id.0)
        else {
            return;
        };
        if base.flags.contains(WidgetFlags::INVISIBLE) {
            return;
        }
        let layout = frame.layout(at);
        if layout.content.is_empty() {
            return;
        }
        if !frame.hollow {
            if !frame.color.is_transparent() {
                r.fill_rect(layout.full.to_kurbo(), frame.color);
            }
            if frame.border > 0 {
                r.bevel(
                    layout.full.to_kurbo(),
                    frame.border,
                    frame.border_color,
                    frame.border_high,
                );
            }
        }
        let child_at = frame.child_placement(&layout);
        for image in frame.images.iter().filter(|i| !i.disabled) {
            paint::image_clipped(
                r,
                &image.path,
                child_at.origin(image.pos),
                layout.content,
                image.color,
            );
        }
        self.draw_list(frame, &layout, r);

        let visible = |c: &WidgetId| {
            self.base(*c)
                .is_some_and(|b| !b.flags.contains(WidgetFlags::INVISIBLE))
        };
        let children: Vec<&Node> = base
            .children
            .iter()
            .filter(|c| visible(c))
            .filter_map(|c| self.nodes.get(c.0))
            .collect();
        for node in &children {
            if let Widget::Field(field) = &node.widget {
                field.draw(&node.base, child_at, r);
            }
        }
        for node in &children {
            if let Widget::Button(button) = &node.widget {
                button.draw(&node.base, child_at, r);
            }
        }
        for node in &children {
            if let Widget::Slider(slider) = &node.widget {
                slider.draw(&node.base, child_at, r);
            }
        }
        Self::draw_scrollbars(frame, &layout, r);
        for &child in &base.children {
            if self.kind(child) == Some(crate::WidgetKind::Frame) {
                self.draw_frame(child, child_at, r);
            }
        }
    }

    fn draw_list(&self, frame: &Frame, layout: &FrameLayout, r: &mut dyn RenderSink) {
        for (i, &handle) in frame.list.iter().enumerate() {
            let Some(entry) = self.entry(handle) else {
                continue;
            };
            let row = frame.row_rect(layout, i);
            let shown = row.intersect(&layout.content);
            if shown.is_empty() {
                continue;
            }
            if entry.pressed {
                r.fill_rect(shown.to_kurbo(), self.style.pressed_color);
            } else if frame.selected_entry == Some(i) {
                r.fill_rect(shown.to_kurbo(), frame.selected_entry_color);
            } else if entry.highlighted {
                r.fill_rect(shown.to_kurbo(), frame.highlight_color);
            }
            let text_area = Rect::new(row.x + ROW_PAD, row.y, row.w - ROW_PAD, row.h);
            paint::text_clipped(
                r,
                &entry.text,
                &frame.font,
                entry.color,
                text_area,
                shown,
                Justify::Left,
                Justify::Center,
            );
        }
    }

    fn draw_scrollbars(frame: &Frame, layout: &FrameLayout, r: &mut dyn RenderSink) {
        if frame.has_h_bar() {
            Self::draw_bar(frame, layout, Axis::Horizontal, r);
        }
        // The vertical bar is not drawn for frames whose visible box starts at y = 0.
        if frame.has_v_bar() && layout.full.y != 0 {
            Self::draw_bar(frame, layout, Axis::Vertical, r);
        }
    }

    fn draw_bar(frame: &Frame, layout: &FrameLayout, axis: Axis, r: &mut dyn RenderSink) {
        let rail = frame.rail(layout, axis);
        let shown = rail.intersect(&layout.full);
        if shown.is_empty() {
            return;
        }
        r.fill_rect(shown.to_kurbo(), frame.rail_color);
        let handle = frame.handle(rail, axis).intersect(&shown);
        if !handle.is_empty() {
            r.fill_rect(handle.to_kurbo(), frame.handle_color);
            r.bevel(handle.to_kurbo(), 1, frame.border_color, frame.drag.is_none());
        }
    }

    fn draw_tooltip(&self, r: &mut dyn RenderSink) {
        let Some(h) = &self.last_highlight else {
            return;
        };
        if h.tooltip.is_empty() || self.now.saturating_sub(h.since) < self.style.tooltip_delay_ms {
            return;
        }
        let font = &self.style.font;
        let Some(size) = r.measure_text(&h.tooltip, font) else {
            return;
        };
        let screen = self.style.screen;
        let w = size.w + 2 * TOOLTIP_PAD;
        let hgt = size.h + 2 * TOOLTIP_PAD;
        let x = (self.mouse.0 + TOOLTIP_OFFSET).min(screen.w - w).max(0);
        let y = (self.mouse.1 + TOOLTIP_OFFSET).min(screen.h - hgt).max(0);
        let bg = Rect::new(x, y, w, hgt);
        r.fill_rect(bg.to_kurbo(), self.style.tooltip_color);
        paint::text_clipped(
            r,
            &h.tooltip,
            font,
            self.style.text_color,
            bg,
            bg,
            Justify::Center,
            Justify::Center,
        );
    }
}
