// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget identity, shared state, and navigation links.

use std::rc::Rc;

use bitflags::bitflags;
use kiln_host::Rect;

use crate::button::Button;
use crate::field::Field;
use crate::frame::Frame;
use crate::gui::Gui;
use crate::slider::Slider;
use crate::slots::SlotKey;

/// Identifier of a widget in a [`Gui`] (generational).
///
/// Ids of removed widgets go stale: every lookup with them returns `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) SlotKey);

impl WidgetId {
    /// Pack the id into 64 bits, e.g. for a
    /// [`ScriptArg::Pointer`](kiln_host::script::ScriptArg::Pointer).
    pub fn to_bits(self) -> u64 {
        self.0.to_bits()
    }
}

bitflags! {
    /// Per-widget state bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// Has keyboard/controller focus. At most one per owner and tree.
        const SELECTED    = 1 << 0;
        /// Pointer is over the widget (set during processing).
        const HIGHLIGHTED = 1 << 1;
        /// Skipped by processing.
        const DISABLED    = 1 << 2;
        /// Skipped by processing and drawing.
        const INVISIBLE   = 1 << 3;
        /// Held down by the pointer.
        const PRESSED     = 1 << 4;
        /// Capturing typed text (fields only).
        const ACTIVATED   = 1 << 5;
    }
}

/// Names of the widgets reached by directional navigation.
///
/// Links are resolved by name every time they are followed, so they may
/// name widgets that do not exist yet. An empty name means "no link".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    /// Moved to on the "right" binding.
    pub right: String,
    /// Moved to on the "down" binding.
    pub down: String,
    /// Moved to on the "left" binding.
    pub left: String,
    /// Moved to on the "up" binding.
    pub up: String,
    /// Moved to on the "page left" binding.
    pub page_left: String,
    /// Moved to on the "page right" binding.
    pub page_right: String,
    /// Activated on the "cancel" binding.
    pub back: String,
    /// Moved to on the "tab" binding.
    pub tab: String,
    /// Frame to resolve the other links from; empty means the tree root.
    pub search_parent: String,
}

/// State shared by every widget kind.
#[derive(Clone, Debug, Default)]
pub struct WidgetBase {
    /// Name, unique among siblings; used by every lookup.
    pub name: String,
    /// Player that owns the widget. Lookups and selection only see widgets of the same owner.
    pub owner: u32,
    /// State bits.
    pub flags: WidgetFlags,
    /// Timestamp (ms) of the last time the pointer entered the widget.
    pub highlight_time: u64,
    /// Navigation links.
    pub links: Links,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
}

impl WidgetBase {
    pub(crate) fn new(name: &str, owner: u32, parent: Option<WidgetId>) -> Self {
        Self {
            name: name.into(),
            owner,
            parent,
            ..Self::default()
        }
    }

    /// Parent frame, `None` for the root.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in insertion order (later is on top).
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Whether the widget has focus.
    pub fn is_selected(&self) -> bool {
        self.flags.contains(WidgetFlags::SELECTED)
    }

    /// Whether the pointer is over the widget.
    pub fn is_highlighted(&self) -> bool {
        self.flags.contains(WidgetFlags::HIGHLIGHTED)
    }

    /// Whether the widget is held down by the pointer.
    pub fn is_pressed(&self) -> bool {
        self.flags.contains(WidgetFlags::PRESSED)
    }

    /// Whether processing skips this widget.
    pub fn is_inert(&self) -> bool {
        self.flags
            .intersects(WidgetFlags::DISABLED | WidgetFlags::INVISIBLE)
    }

    /// Update the highlight bit, stamping `now` when the pointer enters.
    ///
    /// Returns true on the tick the pointer entered.
    pub(crate) fn track_hover(&mut self, over: bool, now: u64) -> bool {
        let was = self.is_highlighted();
        self.flags.set(WidgetFlags::HIGHLIGHTED, over);
        if over && !was {
            self.highlight_time = now;
            return true;
        }
        false
    }
}

/// Discriminant of a widget's kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Container.
    Frame,
    /// Push/toggle/checkbox/drop-down button.
    Button,
    /// Text field.
    Field,
    /// Value slider.
    Slider,
}

/// Kind-specific widget data.
#[derive(Debug)]
pub(crate) enum Widget {
    Frame(Frame),
    Button(Button),
    Field(Field),
    Slider(Slider),
}

impl Widget {
    pub(crate) fn kind(&self) -> WidgetKind {
        match self {
            Self::Frame(_) => WidgetKind::Frame,
            Self::Button(_) => WidgetKind::Button,
            Self::Field(_) => WidgetKind::Field,
            Self::Slider(_) => WidgetKind::Slider,
        }
    }
}

/// One arena slot: shared state plus kind data.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) base: WidgetBase,
    pub(crate) widget: Widget,
}

/// Where a widget sits this tick: its parent's visible content rectangle and scroll.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) parent: Rect,
    pub(crate) scroll: (i32, i32),
}

impl Placement {
    /// Clipped screen rectangle of a box in the parent's content space.
    pub(crate) fn view(self, r: Rect) -> Rect {
        Rect::child_view(self.parent, self.scroll, r)
    }

    /// Unclipped screen rectangle of a box in the parent's content space.
    pub(crate) fn origin(self, r: Rect) -> Rect {
        Rect::child_origin(self.parent, self.scroll, r)
    }
}

/// Native handler invoked when a widget fires (click, enter, value change).
pub type Callback = Rc<dyn Fn(&mut Gui, WidgetId)>;

/// Newest highlight of a tick, bubbled to the root for tooltips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
    /// Highlighted widget.
    pub widget: WidgetId,
    /// When the pointer entered it (ms).
    pub since: u64,
    /// Tooltip text; may be empty.
    pub tooltip: String,
}

/// Navigation bindings checked by [`Gui::handle_input`], in priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Follow [`Links::tab`].
    Tab,
    /// Follow [`Links::right`].
    Right,
    /// Follow [`Links::down`].
    Down,
    /// Follow [`Links::left`].
    Left,
    /// Follow [`Links::up`].
    Up,
    /// Follow [`Links::page_right`].
    PageRight,
    /// Follow [`Links::page_left`].
    PageLeft,
    /// Activate the selected widget.
    Confirm,
    /// Activate [`Links::back`].
    Cancel,
}

impl NavAction {
    /// All actions in the order they are checked.
    pub const PRIORITY: [Self; 9] = [
        Self::Tab,
        Self::Right,
        Self::Down,
        Self::Left,
        Self::Up,
        Self::PageRight,
        Self::PageLeft,
        Self::Confirm,
        Self::Cancel,
    ];

    /// The link followed by this action, if it is a move.
    pub(crate) fn link(self, links: &Links) -> Option<&str> {
        match self {
            Self::Tab => Some(&links.tab),
            Self::Right => Some(&links.right),
            Self::Down => Some(&links.down),
            Self::Left => Some(&links.left),
            Self::Up => Some(&links.up),
            Self::PageRight => Some(&links.page_right),
            Self::PageLeft => Some(&links.page_left),
            Self::Confirm | Self::Cancel => None,
        }
    }
}

/// Outcome of one navigation pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Focus should move to the widget.
    Move(WidgetId),
    /// The widget should be activated.
    Activate(WidgetId),
}
