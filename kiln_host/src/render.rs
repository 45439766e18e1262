// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing interface the widget tree renders through.
//!
//! The tree never rasterizes anything itself. It computes screen rectangles
//! and hands them to a [`RenderSink`] as Kurbo rectangles.

use crate::geometry::Color;

/// Measured size of a run of text in a given font.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

/// Drawing primitives consumed by widget `draw` passes.
pub trait RenderSink {
    /// Fill `rect` with a solid colour.
    fn fill_rect(&mut self, rect: kurbo::Rect, color: Color);

    /// Draw a beveled border of `thickness` pixels inside `rect`.
    ///
    /// `high` selects a raised look (light top-left edges); otherwise sunken.
    fn bevel(&mut self, rect: kurbo::Rect, thickness: u32, color: Color, high: bool);

    /// Measure `text` in `font`, or `None` if the font is unavailable.
    fn measure_text(&mut self, text: &str, font: &str) -> Option<TextSize>;

    /// Draw the `src` part of the rendered text (in text-local pixels) into `dest`.
    fn draw_text(
        &mut self,
        text: &str,
        font: &str,
        src: kurbo::Rect,
        dest: kurbo::Rect,
        color: Color,
    );

    /// Draw the `src` part of an image (in image-local pixels) into `dest`.
    fn draw_image(&mut self, path: &str, src: kurbo::Rect, dest: kurbo::Rect, color: Color);
}

/// A sink that draws nothing and measures every string as zero-sized.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    #[inline]
    fn fill_rect(&mut self, _rect: kurbo::Rect, _color: Color) {}

    #[inline]
    fn bevel(&mut self, _rect: kurbo::Rect, _thickness: u32, _color: Color, _high: bool) {}

    #[inline]
    fn measure_text(&mut self, _text: &str, _font: &str) -> Option<TextSize> {
        Some(TextSize::default())
    }

    #[inline]
    fn draw_text(
        &mut self,
        _text: &str,
        _font: &str,
        _src: kurbo::Rect,
        _dest: kurbo::Rect,
        _color: Color,
    ) {
    }

    #[inline]
    fn draw_image(&mut self, _path: &str, _src: kurbo::Rect, _dest: kurbo::Rect, _color: Color) {}
}
