// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scrolling inventory list.
//!
//! Builds a frame with more rows than fit, scrolls it with the wheel and the
//! scrollbar, clicks a row and prints what the renderer was asked to draw.
//!
//! Run:
//! - `RUST_LOG=kiln_widgets=trace cargo run -p kiln_demos --example scroll_list`

use std::cell::RefCell;
use std::rc::Rc;

use kiln_host::input::{InputSnapshot, MouseButtons};
use kiln_host::platform::FixedClock;
use kiln_host::render::{RenderSink, TextSize};
use kiln_host::{Color, Rect};
use kiln_widgets::Gui;
use tracing_subscriber::EnvFilter;

/// Prints draw calls instead of rasterizing them.
#[derive(Default)]
struct PrintSink {
    texts: Vec<String>,
}

impl RenderSink for PrintSink {
    fn fill_rect(&mut self, rect: kurbo::Rect, _color: Color) {
        println!("  fill  {:?}", (rect.x0, rect.y0, rect.x1, rect.y1));
    }

    fn bevel(&mut self, _rect: kurbo::Rect, _thickness: u32, _color: Color, _high: bool) {}

    fn measure_text(&mut self, text: &str, _font: &str) -> Option<TextSize> {
        let w = i32::try_from(text.chars().count()).ok()? * 7;
        Some(TextSize { w, h: 12 })
    }

    fn draw_text(
        &mut self,
        text: &str,
        _font: &str,
        _src: kurbo::Rect,
        dest: kurbo::Rect,
        _color: Color,
    ) {
        println!("  text  {text:?} at {:?}", (dest.x0, dest.y0));
        self.texts.push(text.to_owned());
    }

    fn draw_image(&mut self, _path: &str, _src: kurbo::Rect, _dest: kurbo::Rect, _color: Color) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut gui = Gui::new(Rect::new(0, 0, 640, 480));
    let root = gui.root();
    let bag = gui
        .add_frame(root, "inventory", Rect::new(20, 20, 200, 100))
        .expect("root is a frame");

    let picked = Rc::new(RefCell::new(Vec::new()));
    let items = ["sword", "shield", "bow", "arrows", "rope", "torch", "bread", "potion"];
    for item in items {
        let handle = gui.add_entry(bag, item, item).expect("bag is a frame");
        let picked = picked.clone();
        gui.entry_mut(handle)
            .expect("just added")
            .on_click(move |g, h| {
                if let Some(e) = g.entry(h) {
                    picked.borrow_mut().push(e.name.clone());
                }
            });
    }
    let rows = i32::try_from(items.len()).expect("few rows") * 20;
    gui.set_actual_size(bag, 200, rows).expect("bag is a frame");

    let mut input = InputSnapshot::at(60, 60);
    input.scroll(0, 1);
    gui.tick(&mut input, &FixedClock(0));
    let scroll = gui.frame(bag).expect("bag is alive").scroll();
    println!("after one wheel tick: {scroll:?}");
    assert_eq!(scroll, (0, 60), "the wheel stops at the last row");

    // Row under (60, 30) is now "arrows".
    input.advance();
    input.move_to(60, 30);
    input.press(MouseButtons::LEFT);
    gui.tick(&mut input, &FixedClock(16));
    println!("picked: {:?}", picked.borrow());
    assert_eq!(*picked.borrow(), ["arrows"]);

    println!("draw calls:");
    let mut sink = PrintSink::default();
    gui.draw(&mut sink);
    assert!(sink.texts.iter().any(|t| t == "arrows"));
    assert!(!sink.texts.iter().any(|t| t == "sword"), "scrolled out");
}
