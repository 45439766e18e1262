// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A drop-down menu opened from a button callback.
//!
//! The menu is created while the opening click is still being processed. It
//! stays open across that click and closes itself after the next one, whether
//! or not the next click lands on one of its items.
//!
//! Run:
//! - `RUST_LOG=kiln_widgets=debug cargo run -p kiln_demos --example drop_down`

use std::cell::Cell;
use std::rc::Rc;

use kiln_host::Rect;
use kiln_host::input::{InputSnapshot, MouseButtons};
use kiln_host::platform::FixedClock;
use kiln_widgets::{ButtonStyle, Gui, WidgetId};
use tracing_subscriber::EnvFilter;

fn open_menu(gui: &mut Gui, chosen: &Rc<Cell<Option<usize>>>) -> Option<WidgetId> {
    let root = gui.root();
    let menu = gui.add_frame(root, "menu", Rect::new(10, 30, 120, 60)).ok()?;
    gui.set_drop_down(menu, true).ok()?;
    for (i, label) in ["New", "Quit"].into_iter().enumerate() {
        let y = i32::try_from(i).ok()? * 30;
        let item = gui.add_button(menu, label, Rect::new(0, y, 120, 30), label).ok()?;
        let chosen = chosen.clone();
        gui.button_mut(item)?
            .set_callback(move |_, _| chosen.set(Some(i)));
    }
    Some(menu)
}

fn click(gui: &mut Gui, input: &mut InputSnapshot, x: i32, y: i32, t: &mut u64) {
    input.move_to(x, y);
    input.press(MouseButtons::LEFT);
    gui.tick(input, &FixedClock(*t));
    input.advance();
    input.release(MouseButtons::LEFT);
    gui.tick(input, &FixedClock(*t + 16));
    input.advance();
    gui.tick(input, &FixedClock(*t + 32));
    input.advance();
    *t += 48;
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut gui = Gui::new(Rect::new(0, 0, 640, 480));
    let root = gui.root();
    let file = gui
        .add_button(root, "file", Rect::new(10, 0, 60, 24), "File")
        .expect("root is a frame");
    gui.button_mut(file).expect("file is a button").style = ButtonStyle::Dropdown;

    let chosen = Rc::new(Cell::new(None));
    let menu = Rc::new(Cell::new(None));
    {
        let chosen = chosen.clone();
        let menu = menu.clone();
        gui.button_mut(file)
            .expect("file is a button")
            .set_callback(move |g, _| menu.set(open_menu(g, &chosen)));
    }

    let mut input = InputSnapshot::at(0, 0);
    let mut t = 0;

    click(&mut gui, &mut input, 20, 10, &mut t);
    let opened = menu.get().expect("menu opened");
    assert!(gui.is_alive(opened), "the opening click does not close it");
    println!("menu open: {} widgets in the tree", gui.widget_count());

    click(&mut gui, &mut input, 40, 70, &mut t);
    assert_eq!(chosen.get(), Some(1));
    assert!(!gui.is_alive(opened), "picking an item closes the menu");
    println!("picked item {:?}, menu closed", chosen.get());
}
