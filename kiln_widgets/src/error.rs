// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for structural misuse of the widget tree.

use thiserror::Error;

use crate::widget::{WidgetId, WidgetKind};

/// A structural operation on a [`Gui`](crate::Gui) could not be performed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiError {
    /// The id refers to a removed widget.
    #[error("widget {0:?} no longer exists")]
    Stale(WidgetId),

    /// The operation needs a frame.
    #[error("widget {id:?} is a {kind:?}, not a frame")]
    NotAFrame {
        /// The offending widget.
        id: WidgetId,
        /// What it actually is.
        kind: WidgetKind,
    },

    /// Adoption would make a widget its own ancestor.
    #[error("adopting {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// Widget being moved.
        child: WidgetId,
        /// Requested parent.
        parent: WidgetId,
    },

    /// The root frame cannot be removed or re-parented.
    #[error("the root frame cannot be removed or adopted")]
    Root,
}
