// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget arena and its root frame.
//!
//! A [`Gui`] owns every widget and list row, the root frame, and the state
//! that lives for one tick or across ticks: the clock reading, the Tab latch,
//! which field captures typed text, removals requested mid-pass, and the
//! newest highlight (for tooltips).
//!
//! ## Minimal usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kiln_host::input::{InputSnapshot, MouseButtons};
//! use kiln_host::platform::FixedClock;
//! use kiln_host::Rect;
//! use kiln_widgets::Gui;
//!
//! let mut gui = Gui::new(Rect::new(0, 0, 320, 240));
//! let root = gui.root();
//! let ok = gui.add_button(root, "ok", Rect::new(10, 10, 60, 20), "OK").unwrap();
//!
//! let clicks = Rc::new(Cell::new(0));
//! let seen = clicks.clone();
//! gui.button_mut(ok).unwrap().set_callback(move |_, _| seen.set(seen.get() + 1));
//!
//! let mut input = InputSnapshot::at(20, 15);
//! input.press(MouseButtons::LEFT);
//! gui.tick(&mut input, &FixedClock(0));
//! input.advance();
//! input.release(MouseButtons::LEFT);
//! gui.tick(&mut input, &FixedClock(16));
//! assert_eq!(clicks.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kiln_host::platform::{NoTextInput, TextInputPlatform};
use kiln_host::script::{ScriptArg, ScriptDispatcher};
use kiln_host::{Color, Rect};

use crate::button::Button;
use crate::entry::{Entry, EntryHandle};
use crate::error::GuiError;
use crate::field::Field;
use crate::frame::{Frame, Image};
use crate::slider::Slider;
use crate::slots::Slots;
use crate::style::Style;
use crate::widget::{
    Highlight, Node, Placement, Widget, WidgetBase, WidgetFlags, WidgetId, WidgetKind,
};

/// Root of a widget tree.
pub struct Gui {
    pub(crate) nodes: Slots<Node>,
    pub(crate) entries: Slots<Entry>,
    root: WidgetId,
    pub(crate) style: Style,
    pub(crate) now: u64,
    pub(crate) mouse: (i32, i32),
    pub(crate) tabbing: bool,
    pub(crate) text_focus: Option<WidgetId>,
    text_input: Box<dyn TextInputPlatform>,
    pub(crate) processing: bool,
    pub(crate) pending_removals: Vec<WidgetId>,
    pub(crate) last_highlight: Option<Highlight>,
}

impl fmt::Debug for Gui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gui")
            .field("widgets", &self.nodes.len())
            .field("entries", &self.entries.len())
            .field("root", &self.root)
            .field("now", &self.now)
            .field("tabbing", &self.tabbing)
            .field("text_focus", &self.text_focus)
            .field("pending_removals", &self.pending_removals)
            .field("last_highlight", &self.last_highlight)
            .finish_non_exhaustive()
    }
}

macro_rules! kind_accessors {
    ($(($get:ident, $get_mut:ident, $variant:ident, $ty:ty)),* $(,)?) => {
        $(
            #[doc = concat!("The ", stringify!($variant), " `id` refers to, if any.")]
            pub fn $get(&self, id: WidgetId) -> Option<&$ty> {
                match &self.nodes.get(id.0)?.widget {
                    Widget::$variant(w) => Some(w),
                    _ => None,
                }
            }

            #[doc = concat!("Mutable access to the ", stringify!($variant), " `id` refers to.")]
            pub fn $get_mut(&mut self, id: WidgetId) -> Option<&mut $ty> {
                match &mut self.nodes.get_mut(id.0)?.widget {
                    Widget::$variant(w) => Some(w),
                    _ => None,
                }
            }
        )*
    };
}

impl Gui {
    /// A tree whose root frame covers `size` of the virtual screen.
    pub fn new(size: Rect) -> Self {
        Self::with_style(size, Style::default())
    }

    /// A tree using `style` for every widget it creates.
    pub fn with_style(size: Rect, style: Style) -> Self {
        let mut nodes = Slots::default();
        let mut root_frame = Frame::new(&style, size);
        root_frame.hollow = true;
        let root = WidgetId(nodes.insert(Node {
            base: WidgetBase::new("root", 0, None),
            widget: Widget::Frame(root_frame),
        }));
        Self {
            nodes,
            entries: Slots::default(),
            root,
            style,
            now: 0,
            mouse: (0, 0),
            tabbing: false,
            text_focus: None,
            text_input: Box::new(NoTextInput),
            processing: false,
            pending_removals: Vec::new(),
            last_highlight: None,
        }
    }

    /// Use `platform` to toggle text-input mode when fields take focus.
    pub fn with_text_input(mut self, platform: impl TextInputPlatform + 'static) -> Self {
        self.text_input = Box::new(platform);
        self
    }

    /// The root frame.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The style new widgets are created with.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Clock reading of the last process pass.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Whether `id` still refers to a widget.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Number of live widgets, the root included.
    pub fn widget_count(&self) -> usize {
        self.nodes.len()
    }

    /// What kind of widget `id` is.
    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.nodes.get(id.0).map(|n| n.widget.kind())
    }

    /// Shared state of `id`.
    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.nodes.get(id.0).map(|n| &n.base)
    }

    /// Mutable shared state of `id`.
    pub fn base_mut(&mut self, id: WidgetId) -> Option<&mut WidgetBase> {
        self.nodes.get_mut(id.0).map(|n| &mut n.base)
    }

    /// Parent frame of `id`.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.base(id)?.parent
    }

    /// Children of `id` in insertion order; empty for leaves and stale ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.base(id).map_or(&[][..], |b| b.children.as_slice())
    }

    kind_accessors!(
        (frame, frame_mut, Frame, Frame),
        (button, button_mut, Button, Button),
        (field, field_mut, Field, Field),
        (slider, slider_mut, Slider, Slider),
    );

    /// A list row.
    pub fn entry(&self, handle: EntryHandle) -> Option<&Entry> {
        self.entries.get(handle.0)
    }

    /// Mutable access to a list row.
    pub fn entry_mut(&mut self, handle: EntryHandle) -> Option<&mut Entry> {
        self.entries.get_mut(handle.0)
    }

    /// Widget whose text input is active.
    pub fn text_focus(&self) -> Option<WidgetId> {
        self.text_focus
    }

    /// Newest highlight of the last process pass.
    pub fn last_highlight(&self) -> Option<&Highlight> {
        self.last_highlight.as_ref()
    }

    /// `id` and all its descendants, parents before children.
    pub(crate) fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(base) = self.base(next) else {
                continue;
            };
            out.push(next);
            stack.extend(base.children.iter().rev().copied());
        }
        out
    }

    fn frame_checked(&mut self, id: WidgetId) -> Result<&mut Frame, GuiError> {
        let node = self.nodes.get_mut(id.0).ok_or(GuiError::Stale(id))?;
        match &mut node.widget {
            Widget::Frame(f) => Ok(f),
            other => Err(GuiError::NotAFrame {
                id,
                kind: other.kind(),
            }),
        }
    }

    fn insert(
        &mut self,
        parent: WidgetId,
        name: &str,
        widget: Widget,
    ) -> Result<WidgetId, GuiError> {
        self.frame_checked(parent)?;
        let owner = self.base(parent).map_or(0, |b| b.owner);
        let id = WidgetId(self.nodes.insert(Node {
            base: WidgetBase::new(name, owner, Some(parent)),
            widget,
        }));
        if let Some(p) = self.base_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Add a child frame.
    pub fn add_frame(
        &mut self,
        parent: WidgetId,
        name: &str,
        size: Rect,
    ) -> Result<WidgetId, GuiError> {
        let frame = Frame::new(&self.style, size);
        self.insert(parent, name, Widget::Frame(frame))
    }

    /// Add a button.
    pub fn add_button(
        &mut self,
        parent: WidgetId,
        name: &str,
        size: Rect,
        text: &str,
    ) -> Result<WidgetId, GuiError> {
        let mut button = Button::new(&self.style);
        button.size = size;
        button.text = text.into();
        self.insert(parent, name, Widget::Button(button))
    }

    /// Add a text field holding up to `capacity` bytes.
    pub fn add_field(
        &mut self,
        parent: WidgetId,
        name: &str,
        size: Rect,
        capacity: usize,
    ) -> Result<WidgetId, GuiError> {
        let mut field = Field::new(&self.style, capacity);
        field.size = size;
        self.insert(parent, name, Widget::Field(field))
    }

    /// Add a slider over `[min_value, max_value]` on `rail`.
    pub fn add_slider(
        &mut self,
        parent: WidgetId,
        name: &str,
        rail: Rect,
        min_value: f64,
        max_value: f64,
    ) -> Result<WidgetId, GuiError> {
        let mut slider = Slider::new(&self.style, min_value, max_value);
        slider.rail_size = rail;
        self.insert(parent, name, Widget::Slider(slider))
    }

    /// Add an image to a frame.
    pub fn add_image(
        &mut self,
        frame: WidgetId,
        name: &str,
        path: &str,
        pos: Rect,
    ) -> Result<(), GuiError> {
        self.frame_checked(frame)?.images.push(Image {
            name: name.into(),
            path: path.into(),
            color: Color::WHITE,
            pos,
            disabled: false,
        });
        Ok(())
    }

    /// Append a row to a frame's list.
    pub fn add_entry(
        &mut self,
        frame: WidgetId,
        name: &str,
        text: &str,
    ) -> Result<EntryHandle, GuiError> {
        self.frame_checked(frame)?;
        let entry = Entry::new(frame, name, text, self.style.text_color);
        let handle = EntryHandle(self.entries.insert(entry));
        self.frame_checked(frame)?.list.push(handle);
        Ok(handle)
    }

    /// Remove `id` and its subtree. During a process pass the removal is
    /// deferred to the end of the pass.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), GuiError> {
        if id == self.root {
            return Err(GuiError::Root);
        }
        if !self.is_alive(id) {
            return Err(GuiError::Stale(id));
        }
        if self.processing {
            if !self.pending_removals.contains(&id) {
                self.pending_removals.push(id);
            }
        } else {
            self.destroy(id);
        }
        Ok(())
    }

    /// Mark a frame for removal after its parent's next pass.
    pub fn remove_self(&mut self, frame: WidgetId) -> Result<(), GuiError> {
        if frame == self.root {
            return Err(GuiError::Root);
        }
        self.frame_checked(frame)?.to_be_deleted = true;
        Ok(())
    }

    /// Remove every child widget, image and row of a frame.
    pub fn clear(&mut self, frame: WidgetId) -> Result<(), GuiError> {
        let f = self.frame_checked(frame)?;
        f.images.clear();
        let children = self.children(frame).to_vec();
        for child in children {
            self.remove(child)?;
        }
        self.clear_entries(frame)
    }

    /// Remove every row of a frame's list.
    pub fn clear_entries(&mut self, frame: WidgetId) -> Result<(), GuiError> {
        let f = self.frame_checked(frame)?;
        let rows = core::mem::take(&mut f.list);
        f.selected_entry = None;
        for row in rows {
            self.entries.remove(row.0);
        }
        Ok(())
    }

    /// Unlink `id` from its parent and free its subtree now.
    pub(crate) fn destroy(&mut self, id: WidgetId) {
        if id == self.root || !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.parent_of(id)
            && let Some(p) = self.base_mut(parent)
        {
            p.children.retain(|&c| c != id);
        }
        for gone in self.subtree(id) {
            if self.text_focus == Some(gone) {
                self.text_focus = None;
                self.text_input.stop_text_input();
            }
            if let Some(Node {
                widget: Widget::Frame(f),
                ..
            }) = self.nodes.remove(gone.0)
            {
                for row in f.list {
                    self.entries.remove(row.0);
                }
            }
        }
        if self.last_highlight.as_ref().is_some_and(|h| !self.is_alive(h.widget)) {
            self.last_highlight = None;
        }
        tracing::debug!(widget = ?id, "widget removed");
    }

    /// Move `id` under `new_parent`, appending it on top of its new siblings.
    pub fn adopt(&mut self, new_parent: WidgetId, id: WidgetId) -> Result<(), GuiError> {
        if id == self.root {
            return Err(GuiError::Root);
        }
        if !self.is_alive(id) {
            return Err(GuiError::Stale(id));
        }
        self.frame_checked(new_parent)?;
        let mut cursor = Some(new_parent);
        while let Some(c) = cursor {
            if c == id {
                return Err(GuiError::WouldCycle {
                    child: id,
                    parent: new_parent,
                });
            }
            cursor = self.parent_of(c);
        }
        if let Some(old) = self.parent_of(id)
            && let Some(p) = self.base_mut(old)
        {
            p.children.retain(|&c| c != id);
        }
        if let Some(p) = self.base_mut(new_parent) {
            p.children.push(id);
        }
        if let Some(b) = self.base_mut(id) {
            b.parent = Some(new_parent);
        }
        Ok(())
    }

    pub(crate) fn find_in(
        &self,
        scope: WidgetId,
        name: &str,
        recursive: bool,
        owner: u32,
        kind: Option<WidgetKind>,
    ) -> Option<WidgetId> {
        let children = self.children(scope);
        let matches = |id: WidgetId| {
            self.nodes.get(id.0).is_some_and(|n| {
                n.base.owner == owner
                    && n.base.name == name
                    && kind.is_none_or(|k| n.widget.kind() == k)
            })
        };
        if let Some(&hit) = children.iter().find(|&&c| matches(c)) {
            return Some(hit);
        }
        if !recursive {
            return None;
        }
        children
            .iter()
            .filter(|&&c| self.kind(c) == Some(WidgetKind::Frame))
            .find_map(|&c| self.find_in(c, name, true, owner, kind))
    }

    /// Find a widget named `name` among the children of `scope` that share its owner,
    /// then, if `recursive`, depth-first through child frames.
    pub fn find_widget(&self, scope: WidgetId, name: &str, recursive: bool) -> Option<WidgetId> {
        let owner = self.base(scope)?.owner;
        self.find_in(scope, name, recursive, owner, None)
    }

    fn find_kind(
        &self,
        scope: WidgetId,
        name: &str,
        recursive: bool,
        kind: WidgetKind,
    ) -> Option<WidgetId> {
        let owner = self.base(scope)?.owner;
        self.find_in(scope, name, recursive, owner, Some(kind))
    }

    /// [`Gui::find_widget`] restricted to frames.
    pub fn find_frame(&self, scope: WidgetId, name: &str, recursive: bool) -> Option<WidgetId> {
        self.find_kind(scope, name, recursive, WidgetKind::Frame)
    }

    /// [`Gui::find_widget`] restricted to buttons.
    pub fn find_button(&self, scope: WidgetId, name: &str, recursive: bool) -> Option<WidgetId> {
        self.find_kind(scope, name, recursive, WidgetKind::Button)
    }

    /// [`Gui::find_widget`] restricted to fields.
    pub fn find_field(&self, scope: WidgetId, name: &str, recursive: bool) -> Option<WidgetId> {
        self.find_kind(scope, name, recursive, WidgetKind::Field)
    }

    /// [`Gui::find_widget`] restricted to sliders.
    pub fn find_slider(&self, scope: WidgetId, name: &str, recursive: bool) -> Option<WidgetId> {
        self.find_kind(scope, name, recursive, WidgetKind::Slider)
    }

    /// An image of `frame` by name.
    pub fn find_image(&self, frame: WidgetId, name: &str) -> Option<&Image> {
        self.frame(frame)?.images.iter().find(|i| i.name == name)
    }

    /// A row of `frame`'s list by name.
    pub fn find_entry(&self, frame: WidgetId, name: &str) -> Option<EntryHandle> {
        self.frame(frame)?
            .list
            .iter()
            .copied()
            .find(|&h| self.entry(h).is_some_and(|e| e.name == name))
    }

    /// Give `id` focus, taking it from every other widget of the same owner.
    pub fn select(&mut self, id: WidgetId) {
        let Some(owner) = self.base(id).map(|b| b.owner) else {
            return;
        };
        for other in self.subtree(self.root) {
            if other == id {
                continue;
            }
            let selected = self
                .base(other)
                .is_some_and(|b| b.owner == owner && b.is_selected());
            if selected {
                self.deselect(other);
            }
        }
        if let Some(b) = self.base_mut(id) {
            b.flags.insert(WidgetFlags::SELECTED);
        }
    }

    /// Drop focus from `id`; a field also stops capturing text.
    pub fn deselect(&mut self, id: WidgetId) {
        if let Some(b) = self.base_mut(id) {
            b.flags.remove(WidgetFlags::SELECTED);
        }
        if self.kind(id) == Some(WidgetKind::Field) {
            self.deactivate(id);
        }
    }

    /// The selected widget of `owner`.
    pub fn selected_widget(&self, owner: u32) -> Option<WidgetId> {
        self.subtree(self.root).into_iter().find(|&id| {
            self.base(id)
                .is_some_and(|b| b.owner == owner && b.is_selected())
        })
    }

    /// Trigger `id`: buttons toggle and fire, editable fields take text focus.
    pub fn activate(&mut self, id: WidgetId) {
        match self.kind(id) {
            Some(WidgetKind::Button) => {
                if let Some(b) = self.button_mut(id) {
                    b.toggle();
                }
                self.fire(id, Vec::new());
            }
            Some(WidgetKind::Field) => {
                if !self.field(id).is_some_and(|f| f.editable) {
                    return;
                }
                if let Some(prev) = self.text_focus
                    && prev != id
                    && let Some(b) = self.base_mut(prev)
                {
                    b.flags.remove(WidgetFlags::ACTIVATED);
                }
                if let Some(b) = self.base_mut(id) {
                    b.flags.insert(WidgetFlags::ACTIVATED);
                }
                self.text_focus = Some(id);
                self.text_input.start_text_input();
            }
            Some(WidgetKind::Frame | WidgetKind::Slider) | None => {}
        }
    }

    /// Stop a field capturing text. Text input mode is only left if the field still owned it.
    pub fn deactivate(&mut self, id: WidgetId) {
        if let Some(b) = self.base_mut(id) {
            b.flags.remove(WidgetFlags::ACTIVATED);
        }
        if self.text_focus == Some(id) {
            self.text_focus = None;
            self.text_input.stop_text_input();
        }
    }

    /// Resize a frame; scroll stays clamped.
    pub fn set_size(&mut self, frame: WidgetId, size: Rect) -> Result<(), GuiError> {
        self.frame_checked(frame)?.set_size(size);
        Ok(())
    }

    /// Set a frame's content extents; scroll stays clamped.
    pub fn set_actual_size(&mut self, frame: WidgetId, w: i32, h: i32) -> Result<(), GuiError> {
        self.frame_checked(frame)?.set_actual_size(w, h);
        Ok(())
    }

    /// Scroll a frame, clamped.
    pub fn scroll_to(&mut self, frame: WidgetId, x: i32, y: i32) -> Result<(), GuiError> {
        self.frame_checked(frame)?.scroll_to(x, y);
        Ok(())
    }

    /// Attach a script context to a frame, or detach it with `None`.
    pub fn set_script(
        &mut self,
        frame: WidgetId,
        script: Option<Rc<RefCell<dyn ScriptDispatcher>>>,
    ) -> Result<(), GuiError> {
        self.frame_checked(frame)?.script = script;
        Ok(())
    }

    /// Make a frame close itself once the inputs held after it opened are released.
    pub fn set_drop_down(&mut self, frame: WidgetId, drop_down: bool) -> Result<(), GuiError> {
        let f = self.frame_checked(frame)?;
        f.drop_down = drop_down;
        f.drop_down_mask = crate::frame::HeldInputs::empty();
        Ok(())
    }

    /// Placement of the root frame on the virtual screen.
    pub(crate) fn root_placement(&self) -> Placement {
        Placement {
            parent: Rect::new(0, 0, self.style.screen.w, self.style.screen.h),
            scroll: (0, 0),
        }
    }

    /// Nearest frame at or above `id` carrying a script.
    pub(crate) fn script_for(&self, id: WidgetId) -> Option<Rc<RefCell<dyn ScriptDispatcher>>> {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            if let Some(script) = self.frame(c).and_then(|f| f.script.clone()) {
                return Some(script);
            }
            cursor = self.parent_of(c);
        }
        None
    }

    /// Dispatch `event` through `script`, logging failures.
    pub(crate) fn dispatch(
        script: &RefCell<dyn ScriptDispatcher>,
        event: &str,
        args: Vec<ScriptArg>,
    ) {
        let Ok(mut script) = script.try_borrow_mut() else {
            tracing::warn!(event, "script re-entered while dispatching; event dropped");
            return;
        };
        if let Err(err) = script.dispatch(event, args) {
            tracing::warn!(event, %err, "script dispatch failed");
        }
    }

    /// Run `id`'s native callback, or dispatch its name to the nearest script.
    pub(crate) fn fire(&mut self, id: WidgetId, args: Vec<ScriptArg>) {
        let callback = self.nodes.get(id.0).and_then(|n| match &n.widget {
            Widget::Button(b) => b.callback.clone(),
            Widget::Field(f) => f.callback.clone(),
            Widget::Slider(s) => s.callback.clone(),
            Widget::Frame(_) => None,
        });
        if let Some(cb) = callback {
            cb(self, id);
            return;
        }
        let Some(name) = self.base(id).map(|b| b.name.clone()) else {
            return;
        };
        match self.parent_of(id).and_then(|p| self.script_for(p)) {
            Some(script) => Self::dispatch(&script, &name, args),
            None => tracing::warn!(widget = %name, "no callback or script to handle widget"),
        }
    }
}
