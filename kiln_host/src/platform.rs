// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock and text-input platform hooks.

/// Monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point.
    fn now_ms(&self) -> u64;
}

/// A clock frozen at a given time. Useful for tests and replays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Wall clock measured from its creation.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Switches the platform in and out of text-input mode (IME, on-screen keyboard).
///
/// Called when a text field takes or releases the input focus.
pub trait TextInputPlatform {
    /// Begin delivering typed text.
    fn start_text_input(&mut self);
    /// Stop delivering typed text.
    fn stop_text_input(&mut self);
}

/// A platform with no text-input mode to toggle.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTextInput;

impl TextInputPlatform for NoTextInput {
    #[inline]
    fn start_text_input(&mut self) {}

    #[inline]
    fn stop_text_input(&mut self) {}
}
