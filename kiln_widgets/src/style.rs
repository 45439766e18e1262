// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Look-and-feel configuration.
//!
//! A [`Style`] seeds the metrics and colours of every widget a [`Gui`](crate::Gui)
//! creates and holds the navigation key bindings. It can be loaded from JSON;
//! missing keys keep their defaults.
//!
//! ```
//! use kiln_widgets::Style;
//!
//! let style = Style::from_json(r#"{ "entry_size": 24, "tooltip_delay_ms": 250 }"#).unwrap();
//! assert_eq!(style.entry_size, 24);
//! assert_eq!(style.slider_size, Style::default().slider_size);
//! ```

use kiln_host::input::{Keys, VirtualScreen};
use kiln_host::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widget::NavAction;

/// Error loading a [`Style`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for a style.
    #[error("style JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value parsed but is out of range.
    #[error("invalid style value `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Keys bound to each navigation action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavBindings {
    /// [`NavAction::Tab`].
    pub tab: Keys,
    /// [`NavAction::Right`].
    pub right: Keys,
    /// [`NavAction::Down`].
    pub down: Keys,
    /// [`NavAction::Left`].
    pub left: Keys,
    /// [`NavAction::Up`].
    pub up: Keys,
    /// [`NavAction::PageRight`].
    pub page_right: Keys,
    /// [`NavAction::PageLeft`].
    pub page_left: Keys,
    /// [`NavAction::Confirm`].
    pub confirm: Keys,
    /// [`NavAction::Cancel`].
    pub cancel: Keys,
}

impl Default for NavBindings {
    fn default() -> Self {
        Self {
            tab: Keys::TAB,
            right: Keys::RIGHT,
            down: Keys::DOWN,
            left: Keys::LEFT,
            up: Keys::UP,
            page_right: Keys::PAGE_DOWN,
            page_left: Keys::PAGE_UP,
            confirm: Keys::RETURN,
            cancel: Keys::ESCAPE,
        }
    }
}

impl NavBindings {
    /// Keys bound to `action`.
    pub fn keys(&self, action: NavAction) -> Keys {
        match action {
            NavAction::Tab => self.tab,
            NavAction::Right => self.right,
            NavAction::Down => self.down,
            NavAction::Left => self.left,
            NavAction::Up => self.up,
            NavAction::PageRight => self.page_right,
            NavAction::PageLeft => self.page_left,
            NavAction::Confirm => self.confirm,
            NavAction::Cancel => self.cancel,
        }
    }
}

/// Metrics, colours and bindings used by a [`Gui`](crate::Gui).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Height of a list row, and a quarter of the wheel scroll step.
    pub entry_size: i32,
    /// Thickness of frame scrollbars.
    pub slider_size: i32,
    /// Hover time before a tooltip shows.
    pub tooltip_delay_ms: u64,
    /// Font for new widgets.
    pub font: String,
    /// Virtual coordinate space.
    pub screen: VirtualScreen,
    /// Frame background.
    pub frame_color: Color,
    /// Bevel colour of frames and buttons.
    pub border_color: Color,
    /// Text.
    pub text_color: Color,
    /// Button face.
    pub button_color: Color,
    /// Hovered button face and hovered list rows.
    pub highlight_color: Color,
    /// Pressed or toggled button face.
    pub pressed_color: Color,
    /// Selected list row.
    pub selected_entry_color: Color,
    /// Text field background.
    pub field_color: Color,
    /// Scrollbar and slider rails.
    pub rail_color: Color,
    /// Scrollbar and slider handles.
    pub handle_color: Color,
    /// Tooltip background.
    pub tooltip_color: Color,
    /// Navigation key bindings.
    pub nav: NavBindings,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            entry_size: 20,
            slider_size: 16,
            tooltip_delay_ms: 500,
            font: "default".into(),
            screen: VirtualScreen::default(),
            frame_color: Color::rgba(32, 32, 40, 224),
            border_color: Color::rgba(96, 96, 112, 255),
            text_color: Color::WHITE,
            button_color: Color::rgba(56, 56, 72, 255),
            highlight_color: Color::rgba(80, 80, 112, 255),
            pressed_color: Color::rgba(40, 40, 56, 255),
            selected_entry_color: Color::rgba(64, 96, 160, 255),
            field_color: Color::rgba(16, 16, 20, 255),
            rail_color: Color::rgba(24, 24, 28, 255),
            handle_color: Color::rgba(128, 128, 144, 255),
            tooltip_color: Color::rgba(0, 0, 0, 208),
            nav: NavBindings::default(),
        }
    }
}

impl Style {
    /// Parse a style from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the layout code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry_size <= 0 {
            return Err(ConfigError::Invalid {
                field: "entry_size",
                reason: "must be positive",
            });
        }
        if self.slider_size < 0 {
            return Err(ConfigError::Invalid {
                field: "slider_size",
                reason: "must not be negative",
            });
        }
        if self.screen.w <= 0 || self.screen.h <= 0 {
            return Err(ConfigError::Invalid {
                field: "screen",
                reason: "must have a positive size",
            });
        }
        Ok(())
    }
}
