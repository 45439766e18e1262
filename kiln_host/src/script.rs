// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script dispatch contract.
//!
//! Frames may carry a script context. Widgets without a native callback
//! fall back to dispatching an event by name through the nearest frame that
//! has one. Arguments are an ordered, type-tagged list that the dispatcher
//! takes ownership of.
//!
//! ```
//! use kiln_host::script::{ScriptArg, ScriptDispatcher, ScriptError};
//!
//! struct Echo(Vec<String>);
//!
//! impl ScriptDispatcher for Echo {
//!     fn dispatch(&mut self, event: &str, args: Vec<ScriptArg>) -> Result<i32, ScriptError> {
//!         self.0.push(format!("{event}:{}", args.len()));
//!         Ok(0)
//!     }
//! }
//!
//! let mut s = Echo(Vec::new());
//! s.dispatch("name_field", vec![ScriptArg::from("Ada")]).unwrap();
//! assert_eq!(s.0, ["name_field:1"]);
//! ```

use thiserror::Error;

/// One type-tagged script argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptArg {
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// String (copied in).
    Str(String),
    /// Opaque host handle, e.g. a packed widget id.
    Pointer(u64),
    /// No value.
    Nil,
}

impl From<bool> for ScriptArg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for ScriptArg {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for ScriptArg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for ScriptArg {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for ScriptArg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ScriptArg {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for ScriptArg {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Failure reported by a script dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script has no handler for the event.
    #[error("no script handler for event `{0}`")]
    UnknownEvent(String),

    /// An argument had the wrong type or arity.
    #[error("bad argument {index} for `{event}`: {reason}")]
    BadArgument {
        /// Event being dispatched.
        event: String,
        /// Position of the offending argument.
        index: usize,
        /// What was wrong.
        reason: String,
    },

    /// The handler ran and failed.
    #[error("script error in `{event}`: {message}")]
    Runtime {
        /// Event being dispatched.
        event: String,
        /// Message from the script engine.
        message: String,
    },
}

/// Dispatch-by-name entry point of a script engine.
pub trait ScriptDispatcher {
    /// Run the handler named `event` with `args`, returning its status code.
    fn dispatch(&mut self, event: &str, args: Vec<ScriptArg>) -> Result<i32, ScriptError>;
}
