// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree interaction tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kiln_host::input::{InputSnapshot, Keys, MouseButtons};
use kiln_host::platform::FixedClock;
use kiln_host::script::{ScriptArg, ScriptDispatcher, ScriptError};
use kiln_host::Rect;

use crate::{EntryListener, Gui, Links, WidgetFlags, WidgetId};

fn gui() -> Gui {
    Gui::new(Rect::new(0, 0, 640, 480))
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(&mut Gui, WidgetId) + 'static) {
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    (count, move |_: &mut Gui, _: WidgetId| seen.set(seen.get() + 1))
}

/// Press and release the left button at `(x, y)` over two ticks.
fn click(g: &mut Gui, x: i32, y: i32, t: u64) {
    let mut input = InputSnapshot::at(x, y);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(t));
    input.advance();
    input.release(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(t + 1));
}

#[derive(Default)]
struct Log(Vec<(String, Vec<ScriptArg>)>);

impl ScriptDispatcher for Log {
    fn dispatch(&mut self, event: &str, args: Vec<ScriptArg>) -> Result<i32, ScriptError> {
        if event != "process" {
            self.0.push((event.into(), args));
        }
        Ok(0)
    }
}

#[test]
fn wheel_scrolls_by_four_rows_and_clamps() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "list", Rect::new(0, 0, 200, 100)).unwrap();
    g.set_actual_size(f, 200, 300).unwrap();
    assert!(g.frame(f).unwrap().has_v_bar());

    let mut input = InputSnapshot::at(50, 50);
    input.scroll(0, 1);
    g.tick(&mut input, &FixedClock(0));
    assert_eq!(g.frame(f).unwrap().actual().y, 80);

    g.tick(&mut input, &FixedClock(1));
    g.tick(&mut input, &FixedClock(2));
    assert_eq!(g.frame(f).unwrap().actual().y, 200);
}

#[test]
fn topmost_sibling_takes_the_click() {
    let mut g = gui();
    let root = g.root();
    let under = g.add_button(root, "under", Rect::new(0, 0, 100, 40), "").unwrap();
    let over = g.add_button(root, "over", Rect::new(50, 0, 100, 40), "").unwrap();
    let (under_clicks, cb) = counter();
    g.button_mut(under).unwrap().set_callback(cb);
    let (over_clicks, cb) = counter();
    g.button_mut(over).unwrap().set_callback(cb);

    let mut input = InputSnapshot::at(75, 20);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(0));
    assert!(g.base(over).unwrap().is_highlighted());
    assert!(!g.base(under).unwrap().is_highlighted());
    input.advance();
    input.release(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(1));

    assert_eq!((under_clicks.get(), over_clicks.get()), (0, 1));
    assert_eq!(g.selected_widget(0), Some(over));
}

#[test]
fn child_frame_shields_parent_widgets() {
    let mut g = gui();
    let root = g.root();
    let behind = g.add_button(root, "behind", Rect::new(0, 0, 200, 200), "").unwrap();
    let (clicks, cb) = counter();
    g.button_mut(behind).unwrap().set_callback(cb);
    g.add_frame(root, "panel", Rect::new(50, 50, 100, 100)).unwrap();

    click(&mut g, 100, 100, 0);
    assert_eq!(clicks.get(), 0);
    click(&mut g, 10, 10, 10);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn scrolled_out_widgets_cannot_be_clicked() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "f", Rect::new(0, 0, 200, 100)).unwrap();
    g.set_actual_size(f, 200, 300).unwrap();
    let b = g.add_button(f, "b", Rect::new(0, 0, 100, 20), "").unwrap();
    let (clicks, cb) = counter();
    g.button_mut(b).unwrap().set_callback(cb);

    g.scroll_to(f, 0, 40).unwrap();
    click(&mut g, 10, 10, 0);
    assert_eq!(clicks.get(), 0);
    g.scroll_to(f, 0, 0).unwrap();
    click(&mut g, 10, 10, 10);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn selection_stays_exclusive_through_clicks() {
    let mut g = gui();
    let root = g.root();
    let panel = g.add_frame(root, "panel", Rect::new(300, 0, 200, 200)).unwrap();
    let a = g.add_button(root, "a", Rect::new(0, 0, 50, 20), "").unwrap();
    let b = g.add_button(panel, "b", Rect::new(0, 0, 50, 20), "").unwrap();
    let name = g.add_field(panel, "name", Rect::new(0, 40, 100, 20), 16).unwrap();

    for (x, y) in [(10, 10), (310, 10), (310, 50), (10, 10)] {
        click(&mut g, x, y, 0);
        let selected: Vec<WidgetId> = [a, b, name]
            .into_iter()
            .filter(|&w| g.base(w).unwrap().is_selected())
            .collect();
        assert_eq!(selected.len(), 1, "after click at {x},{y}");
    }
    assert!(g.base(a).unwrap().is_selected());
    assert_eq!(g.text_focus(), None, "selecting a button drops the field's text focus");
}

#[test]
fn tab_moves_once_per_press() {
    let mut g = gui();
    let root = g.root();
    let a = g.add_field(root, "A", Rect::new(0, 0, 100, 20), 16).unwrap();
    let b = g.add_field(root, "B", Rect::new(0, 30, 100, 20), 16).unwrap();
    let c = g.add_field(root, "C", Rect::new(0, 60, 100, 20), 16).unwrap();
    g.field_mut(a).unwrap().tab_dest_field = "B".into();
    g.field_mut(b).unwrap().tab_dest_field = "C".into();
    g.select(a);
    g.activate(a);

    let mut input = InputSnapshot::at(500, 400);
    input.press_key(Keys::TAB);
    g.tick(&mut input, &FixedClock(0));
    assert!(g.base(b).unwrap().is_selected());
    assert_eq!(g.text_focus(), Some(b));

    // Still held: no further move.
    input.advance();
    g.tick(&mut input, &FixedClock(1));
    assert!(g.base(b).unwrap().is_selected());

    input.advance();
    input.release_key(Keys::TAB);
    g.tick(&mut input, &FixedClock(2));
    input.advance();
    input.press_key(Keys::TAB);
    g.tick(&mut input, &FixedClock(3));
    assert!(g.base(c).unwrap().is_selected());
    assert!(!g.base(a).unwrap().is_selected());
}

#[test]
fn tab_destination_in_another_frame() {
    let mut g = gui();
    let root = g.root();
    let login = g.add_frame(root, "login", Rect::new(0, 0, 200, 100)).unwrap();
    let user = g.add_field(root, "user", Rect::new(300, 0, 100, 20), 16).unwrap();
    let pass = g.add_field(login, "pass", Rect::new(0, 0, 100, 20), 16).unwrap();
    {
        let f = g.field_mut(user).unwrap();
        f.tab_dest_frame = "login".into();
        f.tab_dest_field = "pass".into();
    }
    let (entered, cb) = counter();
    g.field_mut(user).unwrap().set_callback(cb);
    g.select(user);
    g.activate(user);

    let mut input = InputSnapshot::at(600, 400);
    input.press_key(Keys::TAB);
    g.tick(&mut input, &FixedClock(0));
    assert_eq!(g.text_focus(), Some(pass));
    assert_eq!(entered.get(), 1, "tabbing away fires the field");
}

#[test]
fn typing_and_return_fire_the_field_script() {
    let mut g = gui();
    let root = g.root();
    let log = Rc::new(RefCell::new(Log::default()));
    g.set_script(root, Some(log.clone())).unwrap();
    let name = g.add_field(root, "player_name", Rect::new(0, 0, 100, 20), 8).unwrap();

    click(&mut g, 10, 10, 0);
    assert_eq!(g.text_focus(), Some(name));
    let mut input = InputSnapshot::at(10, 10);
    input.type_text("Ada Lovelace");
    input.press_key(Keys::RETURN);
    g.tick(&mut input, &FixedClock(5));

    assert_eq!(g.field(name).unwrap().text(), "Ada Love");
    assert_eq!(
        log.borrow().0,
        [("player_name".to_owned(), vec![ScriptArg::Str("Ada Love".into())])]
    );
}

#[test]
fn clicking_elsewhere_ends_text_input() {
    let mut g = gui();
    let root = g.root();
    let name = g.add_field(root, "name", Rect::new(0, 0, 100, 20), 8).unwrap();
    click(&mut g, 10, 10, 0);
    assert!(g.base(name).unwrap().flags.contains(WidgetFlags::ACTIVATED));
    click(&mut g, 400, 400, 10);
    assert!(!g.base(name).unwrap().flags.contains(WidgetFlags::ACTIVATED));
    assert_eq!(g.text_focus(), None);
}

#[test]
fn arrow_keys_follow_links_and_confirm_activates() {
    let mut g = gui();
    let root = g.root();
    let menu = g.add_frame(root, "menu", Rect::new(0, 0, 200, 200)).unwrap();
    let play = g.add_button(menu, "play", Rect::new(0, 0, 100, 20), "Play").unwrap();
    let quit = g.add_button(menu, "quit", Rect::new(0, 30, 100, 20), "Quit").unwrap();
    g.base_mut(play).unwrap().links = Links {
        down: "quit".into(),
        search_parent: "menu".into(),
        ..Links::default()
    };
    let (quits, cb) = counter();
    g.button_mut(quit).unwrap().set_callback(cb);
    g.select(play);

    let mut input = InputSnapshot::at(600, 400);
    input.press_key(Keys::DOWN);
    g.tick(&mut input, &FixedClock(0));
    assert!(g.base(quit).unwrap().is_selected());
    assert!(!input.key_pressed(Keys::DOWN), "the move consumed the key");

    input.advance();
    input.press_key(Keys::RETURN);
    g.tick(&mut input, &FixedClock(1));
    assert_eq!(quits.get(), 1);
}

#[test]
fn unresolved_links_leave_keys_alone() {
    let mut g = gui();
    let root = g.root();
    let b = g.add_button(root, "b", Rect::new(0, 0, 10, 10), "").unwrap();
    g.base_mut(b).unwrap().links.right = "nowhere".into();
    g.select(b);
    let mut input = InputSnapshot::at(600, 400);
    input.press_key(Keys::RIGHT | Keys::ESCAPE);
    assert_eq!(g.handle_input(b, &mut input), None);
    assert!(input.key_pressed(Keys::RIGHT));
    assert!(input.key_pressed(Keys::ESCAPE));
}

#[test]
fn drop_down_survives_the_opening_click() {
    let mut g = gui();
    let root = g.root();
    let menu = g.add_frame(root, "menu", Rect::new(0, 0, 100, 100)).unwrap();
    g.set_drop_down(menu, true).unwrap();

    // Created while the button is already held.
    let mut input = InputSnapshot::at(300, 300);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(0));
    input.advance();
    g.tick(&mut input, &FixedClock(1));
    assert!(g.is_alive(menu));

    input.advance();
    input.release(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(2));
    assert!(g.frame(menu).unwrap().is_doomed());
    input.advance();
    g.tick(&mut input, &FixedClock(3));
    assert!(!g.is_alive(menu));
}

#[test]
fn drop_down_created_idle_closes_after_next_click() {
    let mut g = gui();
    let root = g.root();
    let menu = g.add_frame(root, "menu", Rect::new(0, 0, 100, 100)).unwrap();
    let item = g.add_button(menu, "item", Rect::new(0, 0, 100, 20), "Item").unwrap();
    let (picked, cb) = counter();
    g.button_mut(item).unwrap().set_callback(cb);
    g.set_drop_down(menu, true).unwrap();

    let mut input = InputSnapshot::at(10, 10);
    g.tick(&mut input, &FixedClock(0));
    g.tick(&mut input, &FixedClock(1));
    assert!(g.is_alive(menu));

    click(&mut g, 10, 10, 2);
    assert_eq!(picked.get(), 1);
    let mut input = InputSnapshot::at(10, 10);
    g.tick(&mut input, &FixedClock(10));
    assert!(!g.is_alive(menu));
    assert!(!g.is_alive(item));
}

#[test]
fn callbacks_can_close_their_own_frame() {
    let mut g = gui();
    let root = g.root();
    let dialog = g.add_frame(root, "dialog", Rect::new(0, 0, 200, 100)).unwrap();
    let close = g.add_button(dialog, "close", Rect::new(0, 0, 50, 20), "X").unwrap();
    g.button_mut(close).unwrap().set_callback(move |g, _| {
        g.remove(dialog).unwrap();
    });
    click(&mut g, 10, 10, 0);
    assert!(!g.is_alive(dialog));
    assert!(!g.is_alive(close));
    assert!(g.children(root).is_empty());
}

#[test]
fn remove_self_is_deferred_to_the_parent_pass() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "f", Rect::new(0, 0, 10, 10)).unwrap();
    g.remove_self(f).unwrap();
    assert!(g.is_alive(f));
    g.tick(&mut InputSnapshot::default(), &FixedClock(0));
    assert!(!g.is_alive(f));
}

#[test]
fn list_suicide_shifts_rows_up() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "bag", Rect::new(0, 0, 200, 100)).unwrap();
    let rows: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|n| g.add_entry(f, n, n).unwrap())
        .collect();
    g.frame_mut(f).unwrap().selected_entry = Some(2);
    assert!(EntryListener::new(rows[1]).delete(&mut g));

    // Hover row index 1 (y 20..40) after the sweep: that is now "c".
    let mut input = InputSnapshot::at(10, 25);
    g.tick(&mut input, &FixedClock(0));
    let frame = g.frame(f).unwrap();
    assert_eq!(frame.list(), [rows[0], rows[2], rows[3]]);
    assert_eq!(frame.selected_entry, Some(1), "selection follows its row");
    assert!(g.entry(rows[2]).unwrap().is_highlighted());
    assert!(g.entry(rows[1]).is_none());
}

#[test]
fn list_clicks_pick_the_callback() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "bag", Rect::new(0, 0, 200, 100)).unwrap();
    let log = Rc::new(RefCell::new(Log::default()));
    g.set_script(f, Some(log.clone())).unwrap();
    let sword = g.add_entry(f, "sword", "Sword").unwrap();
    let shield = g.add_entry(f, "shield", "Shield").unwrap();
    let hits = Rc::new(RefCell::new(Vec::new()));
    {
        let (h1, h2) = (hits.clone(), hits.clone());
        let e = g.entry_mut(sword).unwrap();
        e.on_click(move |_, _| h1.borrow_mut().push("click"));
        e.on_ctrl_click(move |_, _| h2.borrow_mut().push("ctrl"));
    }

    let mut input = InputSnapshot::at(10, 5);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(0));
    input.advance();
    input.release(MouseButtons::LEFT);
    input.press_key(Keys::CTRL);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(1));
    assert_eq!(*hits.borrow(), ["click", "ctrl"]);

    // No handler: the row name goes to the script with the row handle.
    input.advance();
    input.release(MouseButtons::LEFT);
    input.move_to(10, 25);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(2));
    assert_eq!(
        log.borrow().0,
        [(
            "shield".to_owned(),
            vec![ScriptArg::Pointer(shield.to_bits())]
        )]
    );
    assert_eq!(g.frame(f).unwrap().selected_entry, Some(1));
}

#[test]
fn slider_drag_fires_on_change_only() {
    let mut g = gui();
    let root = g.root();
    let log = Rc::new(RefCell::new(Log::default()));
    g.set_script(root, Some(log.clone())).unwrap();
    let s = g.add_slider(root, "volume", Rect::new(100, 100, 100, 10), 0.0, 10.0).unwrap();

    let mut input = InputSnapshot::at(150, 105);
    input.press(MouseButtons::LEFT);
    g.tick(&mut input, &FixedClock(0));
    input.advance();
    g.tick(&mut input, &FixedClock(1));
    input.advance();
    input.move_to(175, 300);
    g.tick(&mut input, &FixedClock(2));

    assert_eq!(g.slider(s).unwrap().value(), 7.5);
    let values: Vec<_> = log.borrow().0.iter().map(|(_, a)| a.clone()).collect();
    assert_eq!(values, [vec![ScriptArg::Float(5.0)], vec![ScriptArg::Float(7.5)]]);
}

#[test]
fn scrollbar_press_blocks_widgets_underneath() {
    let mut g = gui();
    let root = g.root();
    let under = g.add_button(root, "under", Rect::new(0, 0, 640, 480), "").unwrap();
    let (clicks, cb) = counter();
    g.button_mut(under).unwrap().set_callback(cb);
    let f = g.add_frame(root, "f", Rect::new(0, 10, 200, 100)).unwrap();
    g.frame_mut(f).unwrap().hollow = false;
    g.set_actual_size(f, 200, 300).unwrap();

    click(&mut g, 195, 100, 0);
    assert_eq!(g.frame(f).unwrap().scroll(), (0, 80));
    assert_eq!(clicks.get(), 0);
}

fn assert_scroll_clamped(g: &Gui, f: WidgetId) {
    let fr = g.frame(f).unwrap();
    let (mx, my) = fr.max_scroll();
    let (x, y) = fr.scroll();
    assert!((0..=mx).contains(&x) && (0..=my).contains(&y), "{x},{y} outside {mx},{my}");
}

#[test]
fn scroll_clamp_holds_under_random_operations() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "f", Rect::new(0, 0, 120, 90)).unwrap();
    let mut seed = 0x2545_f491_u32;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        i32::try_from(seed % 600).unwrap() - 100
    };
    let mut t = 0;
    for _ in 0..500 {
        t += 10;
        match next().rem_euclid(6) {
            0 => g.set_actual_size(f, next(), next()).unwrap(),
            1 => g.scroll_to(f, next(), next()).unwrap(),
            2 => g.set_size(f, Rect::new(0, 0, next().max(1), next().max(1))).unwrap(),
            3 => {
                let mut input = InputSnapshot::at(next().rem_euclid(120), next().rem_euclid(90));
                input.scroll(next() / 50, next() / 50);
                g.tick(&mut input, &FixedClock(t));
            }
            4 => {
                // Somewhere along the right or bottom edge, where the rails sit.
                let (x, y) = if next() % 2 == 0 {
                    (next().rem_euclid(120), 80 + next().rem_euclid(10))
                } else {
                    (110 + next().rem_euclid(10), next().rem_euclid(90))
                };
                click(&mut g, x, y, t);
            }
            _ => {
                let mut input = InputSnapshot::at(110 + next().rem_euclid(10), 10);
                input.press(MouseButtons::LEFT);
                g.tick(&mut input, &FixedClock(t));
                for step in 1..4 {
                    input.advance();
                    input.move_to(next(), next());
                    g.tick(&mut input, &FixedClock(t + step));
                    assert_scroll_clamped(&g, f);
                }
                input.advance();
                input.release(MouseButtons::LEFT);
                g.tick(&mut input, &FixedClock(t + 4));
            }
        }
        assert_scroll_clamped(&g, f);
    }
}

#[test]
fn nested_frame_scrolled_half_out_keeps_its_children_in_place() {
    let mut g = gui();
    let root = g.root();
    let outer = g.add_frame(root, "outer", Rect::new(0, 0, 200, 100)).unwrap();
    g.set_actual_size(outer, 200, 400).unwrap();
    g.scroll_to(outer, 0, 50).unwrap();
    let inner = g.add_frame(outer, "inner", Rect::new(0, 30, 150, 200)).unwrap();
    let b = g.add_button(inner, "b", Rect::new(0, 40, 100, 20), "").unwrap();

    // The inner frame starts 20 px above the outer one, so the button spans y 20..40.
    let hovered = |g: &mut Gui, y: i32| {
        let mut input = InputSnapshot::at(50, y);
        g.tick(&mut input, &FixedClock(0));
        g.base(b).unwrap().is_highlighted()
    };
    assert!(hovered(&mut g, 25));
    assert!(!hovered(&mut g, 45));

    g.scroll_to(outer, 0, 60).unwrap();
    assert!(hovered(&mut g, 12));
    assert!(!hovered(&mut g, 35));
}

#[test]
fn rebound_tab_key_moves_once_per_press() {
    let mut style = crate::Style::default();
    style.nav.tab = Keys::SPACE;
    let mut g = Gui::with_style(Rect::new(0, 0, 640, 480), style);
    let root = g.root();
    let a = g.add_field(root, "A", Rect::new(0, 0, 100, 20), 16).unwrap();
    let b = g.add_field(root, "B", Rect::new(0, 30, 100, 20), 16).unwrap();
    g.field_mut(a).unwrap().tab_dest_field = "B".into();
    g.field_mut(b).unwrap().tab_dest_field = "A".into();
    g.select(a);
    g.activate(a);

    let mut input = InputSnapshot::at(500, 400);
    input.press_key(Keys::TAB);
    for t in 0..4 {
        g.tick(&mut input, &FixedClock(t));
        assert_eq!(g.selected_widget(0), Some(a), "physical Tab is unbound");
        input.advance();
    }

    input.release_key(Keys::TAB);
    input.press_key(Keys::SPACE);
    for t in 4..8 {
        g.tick(&mut input, &FixedClock(t));
        assert_eq!(g.selected_widget(0), Some(b));
        input.advance();
    }
}

#[test]
fn highlight_bubbles_to_the_root() {
    let mut g = gui();
    let root = g.root();
    let f = g.add_frame(root, "f", Rect::new(100, 100, 100, 100)).unwrap();
    let b = g.add_button(f, "b", Rect::new(0, 0, 50, 50), "").unwrap();
    g.button_mut(b).unwrap().tooltip = "Deep".into();
    let mut input = InputSnapshot::at(110, 110);
    let r = g.tick(&mut input, &FixedClock(42));
    let h = r.highlight.unwrap();
    assert_eq!((h.widget, h.since, h.tooltip.as_str()), (b, 42, "Deep"));
    assert!(!r.usable);
    assert_eq!(g.last_highlight().map(|h| h.widget), Some(b));
}
