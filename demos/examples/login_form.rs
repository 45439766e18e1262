// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text fields, Tab hand-off and a script context.
//!
//! A login frame holds two fields. Typing fills the focused field, Tab moves
//! to the next one and Return hands the text to the frame's script.
//!
//! Run:
//! - `RUST_LOG=kiln_widgets=debug cargo run -p kiln_demos --example login_form`

use std::cell::RefCell;
use std::rc::Rc;

use kiln_host::Rect;
use kiln_host::input::{InputSnapshot, Keys, MouseButtons};
use kiln_host::platform::FixedClock;
use kiln_host::script::{ScriptArg, ScriptDispatcher, ScriptError};
use kiln_widgets::Gui;
use tracing_subscriber::EnvFilter;

/// Stands in for the game's script VM.
#[derive(Default)]
struct Console {
    submitted: Vec<String>,
}

impl ScriptDispatcher for Console {
    fn dispatch(&mut self, event: &str, args: Vec<ScriptArg>) -> Result<i32, ScriptError> {
        match (event, args.as_slice()) {
            ("process", _) => Ok(0),
            ("user" | "pass", [ScriptArg::Str(text)]) => {
                println!("{event} = {text:?}");
                self.submitted.push(text.clone());
                Ok(0)
            }
            _ => Err(ScriptError::UnknownEvent(event.to_owned())),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut gui = Gui::new(Rect::new(0, 0, 640, 480));
    let root = gui.root();
    let login = gui
        .add_frame(root, "login", Rect::new(200, 150, 240, 120))
        .expect("root is a frame");
    let console = Rc::new(RefCell::new(Console::default()));
    gui.set_script(login, Some(console.clone()))
        .expect("login is a frame");

    let user = gui
        .add_field(login, "user", Rect::new(20, 20, 200, 24), 16)
        .expect("login is a frame");
    let pass = gui
        .add_field(login, "pass", Rect::new(20, 60, 200, 24), 16)
        .expect("login is a frame");
    gui.field_mut(user).expect("user is a field").tab_dest_field = "pass".into();

    let mut t = 0;
    let mut input = InputSnapshot::at(240, 180);
    let mut step = |gui: &mut Gui, input: &mut InputSnapshot| {
        gui.tick(input, &FixedClock(t));
        input.advance();
        t += 16;
    };

    // Click into the first field and type.
    input.press(MouseButtons::LEFT);
    step(&mut gui, &mut input);
    input.release(MouseButtons::LEFT);
    input.type_text("ada");
    step(&mut gui, &mut input);
    assert_eq!(gui.text_focus(), Some(user));

    // Tab to the password field and submit.
    input.press_key(Keys::TAB);
    step(&mut gui, &mut input);
    input.release_key(Keys::TAB);
    assert_eq!(gui.text_focus(), Some(pass));
    input.type_text("hunter2");
    input.press_key(Keys::RETURN);
    step(&mut gui, &mut input);

    assert_eq!(console.borrow().submitted, ["ada", "hunter2"]);
}
