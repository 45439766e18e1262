// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipped text and image drawing shared by the widget draw passes.

use kiln_host::render::RenderSink;
use kiln_host::{Color, Rect};

/// Placement of text inside its box.
///
/// Horizontal justification uses `Left`, `Center`, `Right`; vertical uses
/// `Top`, `Center`, `Bottom`. The other values behave like `Center`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    /// Top edge.
    Top,
    /// Left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
}

impl Justify {
    /// Offset of a run of length `len` inside `space`.
    pub(crate) fn offset(self, space: i32, len: i32) -> i32 {
        match self {
            Self::Left | Self::Top => 0,
            Self::Right | Self::Bottom => space - len,
            Self::Center => (space - len) / 2,
        }
    }
}

/// Draw the part of `image` placed at `dest` (unclipped) that falls inside `clip`.
pub(crate) fn image_clipped(
    r: &mut dyn RenderSink,
    path: &str,
    dest: Rect,
    clip: Rect,
    color: Color,
) {
    let shown = dest.intersect(&clip);
    if shown.is_empty() {
        return;
    }
    let src = Rect::new(shown.x - dest.x, shown.y - dest.y, shown.w, shown.h);
    r.draw_image(path, src.to_kurbo(), shown.to_kurbo(), color);
}

/// Draw `text` justified inside `area` (unclipped), showing only what falls inside `clip`.
///
/// Returns the unclipped rectangle the text occupies, or `None` when nothing was drawn.
#[allow(
    clippy::too_many_arguments,
    reason = "Mirrors the render sink's text call plus placement."
)]
pub(crate) fn text_clipped(
    r: &mut dyn RenderSink,
    text: &str,
    font: &str,
    color: Color,
    area: Rect,
    clip: Rect,
    hjustify: Justify,
    vjustify: Justify,
) -> Option<Rect> {
    if text.is_empty() {
        return None;
    }
    let size = r.measure_text(text, font)?;
    let placed = Rect::new(
        area.x + hjustify.offset(area.w, size.w),
        area.y + vjustify.offset(area.h, size.h),
        size.w,
        size.h,
    );
    let shown = placed.intersect(&clip).intersect(&area);
    if shown.is_empty() {
        return None;
    }
    let src = Rect::new(shown.x - placed.x, shown.y - placed.y, shown.w, shown.h);
    r.draw_text(text, font, src.to_kurbo(), shown.to_kurbo(), color);
    Some(placed)
}
