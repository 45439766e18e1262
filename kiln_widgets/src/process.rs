// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tick input pass.
//!
//! [`Gui::process`] runs keyboard navigation for selected widgets, then walks
//! the tree from the root. Inside a frame, input is offered to the topmost
//! element of each category first: child frames back-to-front, the frame's
//! scrollbars, buttons back-to-front, sliders, the list, then fields. The
//! first element to take the pointer clears `usable`; later elements still
//! run but must not react to the pointer.
//!
//! Child collections only change at checkpoints: right after a child frame's
//! pass, at the start of the list pass (rows marked `suicide`), and at the
//! end of [`Gui::process`] for removals requested by callbacks.

use kiln_host::input::{InputSnapshot, Keys, MouseButtons};
use kiln_host::platform::Clock;
use kiln_host::script::ScriptArg;
use kiln_host::Rect;

use crate::entry::{EntryCallback, EntryHandle};
use crate::frame::{FrameLayout, FrameResult, HeldInputs};
use crate::gui::Gui;
use crate::widget::{
    Highlight, NavAction, Navigation, Node, Placement, Widget, WidgetFlags, WidgetId, WidgetKind,
};

/// Keep whichever highlight started last; ties keep the one found first (topmost).
fn newer(current: &mut Option<Highlight>, candidate: Option<Highlight>) {
    let Some(candidate) = candidate else {
        return;
    };
    match current {
        Some(c) if c.since >= candidate.since => {}
        _ => *current = Some(candidate),
    }
}

impl Gui {
    /// Resolve a navigation link of `id` by name.
    ///
    /// The search starts at the frame named by `search_parent`, or the root,
    /// and only sees widgets of `id`'s owner.
    pub fn resolve_link(&self, id: WidgetId, name: &str) -> Option<WidgetId> {
        if name.is_empty() {
            return None;
        }
        let base = self.base(id)?;
        let scope = if base.links.search_parent.is_empty() {
            self.root()
        } else {
            self.find_in(
                self.root(),
                &base.links.search_parent,
                true,
                base.owner,
                Some(WidgetKind::Frame),
            )?
        };
        self.find_in(scope, name, true, base.owner, None)
    }

    /// Map pressed navigation keys to a focus move or activation for the selected widget `id`.
    ///
    /// Bindings are checked in [`NavAction::PRIORITY`] order; the first one
    /// that matches and resolves consumes its key press.
    pub fn handle_input(&self, id: WidgetId, input: &mut InputSnapshot) -> Option<Navigation> {
        let base = self.base(id)?;
        if !base.is_selected() {
            return None;
        }
        for action in NavAction::PRIORITY {
            let keys = self.style.nav.keys(action);
            if keys.is_empty() || !input.key_pressed(keys) {
                continue;
            }
            let nav = match action {
                NavAction::Confirm => Some(Navigation::Activate(id)),
                NavAction::Cancel => self
                    .resolve_link(id, &base.links.back)
                    .map(Navigation::Activate),
                _ => action
                    .link(&base.links)
                    .and_then(|name| self.resolve_link(id, name))
                    .map(Navigation::Move),
            };
            if let Some(nav) = nav {
                input.consume_key(keys);
                tracing::debug!(widget = %base.name, ?action, ?nav, "navigation");
                return Some(nav);
            }
        }
        None
    }

    fn navigate(&mut self, input: &mut InputSnapshot) {
        let tab = self.style.nav.tab;
        let selected: Vec<WidgetId> = self
            .subtree(self.root())
            .into_iter()
            .filter(|&id| self.base(id).is_some_and(|b| b.is_selected() && !b.is_inert()))
            .collect();
        for id in selected {
            let tab_was_pressed = input.key_pressed(tab);
            match self.handle_input(id, input) {
                Some(Navigation::Move(target)) => {
                    if tab_was_pressed && !input.key_pressed(tab) {
                        // A field that takes focus from Tab must not tab again on the same press.
                        self.tabbing = true;
                    }
                    self.select(target);
                    if self.kind(target) == Some(WidgetKind::Field) {
                        self.activate(target);
                    }
                }
                Some(Navigation::Activate(target)) => self.activate(target),
                None => {}
            }
        }
    }

    /// Run one input pass over the tree.
    ///
    /// Navigation is skipped while a field captures text.
    pub fn process(&mut self, input: &mut InputSnapshot, clock: &dyn Clock) -> FrameResult {
        self.now = clock.now_ms();
        self.mouse = input.mouse;
        if !input.key_held(self.style.nav.tab) {
            self.tabbing = false;
        }
        self.processing = true;
        if self.text_focus.is_none() {
            self.navigate(input);
        }
        let root = self.root();
        let at = self.root_placement();
        let mut result = self.process_frame(root, at, true, input);
        self.processing = false;

        if result.removed {
            tracing::debug!("the root frame cannot remove itself");
            if let Some(f) = self.frame_mut(root) {
                f.to_be_deleted = false;
            }
            result.removed = false;
        }
        for id in core::mem::take(&mut self.pending_removals) {
            self.destroy(id);
        }
        if result
            .highlight
            .as_ref()
            .is_some_and(|h| !self.is_alive(h.widget))
        {
            result.highlight = None;
        }
        self.last_highlight = result.highlight.clone();
        result
    }

    /// Advance drop-down frames with the inputs held this tick.
    pub fn postprocess(&mut self, input: &InputSnapshot) {
        let held = HeldInputs::sample(input);
        for id in self.subtree(self.root()) {
            if let Some(f) = self.frame_mut(id)
                && f.postprocess_drop_down(held)
            {
                tracing::debug!(frame = ?id, "drop-down released; closing");
            }
        }
    }

    /// [`Gui::process`] followed by [`Gui::postprocess`].
    pub fn tick(&mut self, input: &mut InputSnapshot, clock: &dyn Clock) -> FrameResult {
        let result = self.process(input, clock);
        self.postprocess(input);
        result
    }

    fn children_of_kind(&self, id: WidgetId, kind: WidgetKind) -> Vec<WidgetId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .filter(|&c| {
                self.base(c).is_some_and(|b| !b.is_inert()) && self.kind(c) == Some(kind)
            })
            .collect()
    }

    pub(crate) fn process_frame(
        &mut self,
        id: WidgetId,
        at: Placement,
        mut usable: bool,
        input: &mut InputSnapshot,
    ) -> FrameResult {
        let Some(frame) = self.frame(id) else {
            return FrameResult::pass(usable);
        };
        let doomed = frame.to_be_deleted;
        let layout = frame.layout(at);
        if self.base(id).is_none_or(|b| b.is_inert()) || layout.content.is_empty() {
            return FrameResult {
                usable,
                removed: doomed,
                highlight: None,
            };
        }
        let mut highlight = None;
        let now = self.now;

        // 1. Child frames, topmost first.
        for child in self.children_of_kind(id, WidgetKind::Frame) {
            let at = match self.frame(id) {
                Some(f) => f.child_placement(&layout),
                None => break,
            };
            let r = self.process_frame(child, at, usable, input);
            usable = r.usable;
            newer(&mut highlight, r.highlight);
            if r.removed {
                self.destroy(child);
            }
        }

        // 2. Wheel and scrollbars.
        let Some(frame) = self.frame_mut(id) else {
            return FrameResult::pass(usable);
        };
        if frame.process_scroll(&layout, input, usable) {
            usable = false;
        }
        let child_at = frame.child_placement(&layout);

        // 3. Buttons.
        for child in self.children_of_kind(id, WidgetKind::Button) {
            let Some(Node {
                base,
                widget: Widget::Button(button),
            }) = self.nodes.get_mut(child.0)
            else {
                continue;
            };
            let r = button.process(base, child_at, usable, input, now);
            if !r.highlighted {
                continue;
            }
            usable = false;
            newer(
                &mut highlight,
                Some(Highlight {
                    widget: child,
                    since: r.highlight_time,
                    tooltip: r.tooltip,
                }),
            );
            if r.pressed && input.mouse_pressed(MouseButtons::LEFT) {
                input.consume_mouse(MouseButtons::LEFT);
                self.select(child);
            }
            if r.clicked {
                self.activate(child);
            }
        }

        // 4. Sliders.
        for child in self.children_of_kind(id, WidgetKind::Slider) {
            let Some(Node {
                base,
                widget: Widget::Slider(slider),
            }) = self.nodes.get_mut(child.0)
            else {
                continue;
            };
            let r = slider.process(base, child_at, usable, input, now);
            let value = slider.value();
            if r.highlighted {
                usable = false;
                newer(
                    &mut highlight,
                    Some(Highlight {
                        widget: child,
                        since: r.highlight_time,
                        tooltip: r.tooltip,
                    }),
                );
            }
            if r.pressed && input.mouse_pressed(MouseButtons::LEFT) {
                input.consume_mouse(MouseButtons::LEFT);
                self.select(child);
            }
            if r.clicked {
                self.fire(child, vec![ScriptArg::Float(value)]);
            }
        }

        // 5. Per-tick script notification.
        if let Some(script) = self.frame(id).and_then(|f| f.script.clone()) {
            Self::dispatch(&script, "process", Vec::new());
        }

        // 6. List rows.
        if self.process_list(id, &layout, usable, input) {
            usable = false;
        }

        // 7. Fields.
        for child in self.children_of_kind(id, WidgetKind::Field) {
            let owns_focus = self.text_focus == Some(child);
            let Some(Node {
                base,
                widget: Widget::Field(field),
            }) = self.nodes.get_mut(child.0)
            else {
                continue;
            };
            let r = field.process(
                base,
                child_at,
                usable,
                input,
                owns_focus,
                self.style.nav.tab,
                &mut self.tabbing,
                now,
            );
            let editable = field.editable;
            let activated = base.flags.contains(WidgetFlags::ACTIVATED);
            let text = field.text().to_owned();
            if r.highlighted {
                usable = false;
                newer(
                    &mut highlight,
                    Some(Highlight {
                        widget: child,
                        since: r.highlight_time,
                        tooltip: r.tooltip,
                    }),
                );
            }
            if r.clicked {
                self.select(child);
                if editable {
                    self.activate(child);
                }
            } else if r.clicked_outside && activated {
                self.deactivate(child);
            }
            if r.entered {
                self.fire(child, vec![ScriptArg::Str(text.clone())]);
            }
            if r.tabbed {
                self.fire(child, vec![ScriptArg::Str(text)]);
                self.tab_from(child);
            }
        }

        // 8. Claim the pointer, report removal, count the tick.
        let Some(frame) = self.frame_mut(id) else {
            return FrameResult::pass(usable);
        };
        let (mx, my) = input.mouse;
        if !frame.hollow && layout.full.contains(mx, my) {
            usable = false;
        }
        let removed = frame.to_be_deleted;
        if !removed {
            frame.ticks = frame.ticks.saturating_add(1);
        }
        FrameResult {
            usable,
            removed,
            highlight,
        }
    }

    /// Sweep dead rows, then hit-test the rest. Returns whether a row took the pointer.
    fn process_list(
        &mut self,
        id: WidgetId,
        layout: &FrameLayout,
        usable: bool,
        input: &mut InputSnapshot,
    ) -> bool {
        let Some(frame) = self.frame(id) else {
            return false;
        };
        let rows = frame.list.clone();
        let selected = frame.selected_entry.and_then(|s| rows.get(s)).copied();

        let mut kept = Vec::with_capacity(rows.len());
        for handle in rows {
            if self.entry(handle).is_some_and(|e| !e.suicide) {
                kept.push(handle);
            } else {
                self.entries.remove(handle.0);
            }
        }
        let Some(frame) = self.frame_mut(id) else {
            return false;
        };
        frame.selected_entry = selected.and_then(|h| kept.iter().position(|&k| k == h));
        let rects: Vec<Rect> = (0..kept.len())
            .map(|i| frame.row_rect(layout, i).intersect(&layout.content))
            .collect();
        frame.list = kept.clone();

        let ctrl = input.key_held(Keys::CTRL);
        let (mx, my) = input.mouse;
        let mut callbacks: Vec<(EntryCallback, EntryHandle)> = Vec::new();
        let mut unhandled: Vec<(String, EntryHandle)> = Vec::new();
        let mut pressed_row = None;
        let mut took = false;
        for (i, (handle, rect)) in kept.into_iter().zip(rects).enumerate() {
            let Some(entry) = self.entries.get_mut(handle.0) else {
                continue;
            };
            let over = usable && !rect.is_empty() && rect.contains(mx, my);
            let entered = over && !entry.highlighted;
            entry.highlighted = over;
            entry.pressed = over && input.mouse_held(MouseButtons::LEFT);
            if !over {
                continue;
            }
            took = true;
            if entered && let Some(cb) = entry.highlight.clone() {
                callbacks.push((cb, handle));
            }
            if let Some(cb) = entry.highlighting.clone() {
                callbacks.push((cb, handle));
            }
            if input.mouse_pressed(MouseButtons::LEFT) {
                input.consume_mouse(MouseButtons::LEFT);
                pressed_row = Some(i);
                let click = match &entry.ctrl_click {
                    Some(cb) if ctrl => Some(cb.clone()),
                    _ => entry.click.clone(),
                };
                match click {
                    Some(cb) => callbacks.push((cb, handle)),
                    None => unhandled.push((entry.name.clone(), handle)),
                }
            }
        }
        if let Some(row) = pressed_row
            && let Some(frame) = self.frame_mut(id)
        {
            frame.selected_entry = Some(row);
        }

        for (cb, handle) in callbacks {
            cb(self, handle);
        }
        for (name, handle) in unhandled {
            match self.script_for(id) {
                Some(script) => {
                    Self::dispatch(&script, &name, vec![ScriptArg::Pointer(handle.to_bits())]);
                }
                None => tracing::warn!(entry = %name, "no callback or script to handle list row"),
            }
        }
        took
    }

    /// Move focus from a field to its Tab destination.
    fn tab_from(&mut self, field: WidgetId) {
        let Some((frame_name, field_name, owner, parent)) = self.field(field).and_then(|f| {
            let base = self.base(field)?;
            Some((
                f.tab_dest_frame.clone(),
                f.tab_dest_field.clone(),
                base.owner,
                base.parent,
            ))
        }) else {
            return;
        };
        let frame = if frame_name.is_empty() {
            parent
        } else {
            self.find_in(self.root(), &frame_name, true, owner, Some(WidgetKind::Frame))
        };
        let dest = frame
            .and_then(|f| self.find_in(f, &field_name, true, owner, Some(WidgetKind::Field)));
        match dest {
            Some(dest) => {
                tracing::debug!(from = ?field, to = ?dest, "tab");
                self.select(dest);
                self.activate(dest);
            }
            None => {
                tracing::debug!(
                    frame = %frame_name,
                    field = %field_name,
                    "tab destination not found"
                );
            }
        }
    }
}
