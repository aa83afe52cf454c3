//! Time abstraction traits and the pending-wait primitive.
//!
//! The game never blocks. Every pause in the turn cycle is held as a [`Wait`]
//! and observed elapsed during `service()`, so the same core runs off a
//! hardware timer, an RTOS tick or a test clock.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// A pending delay: an anchor instant plus a millisecond budget.
///
/// The game holds one `Wait` per scheduled deadline and polls them from
/// `service()`. Several waits can be pending at once (a lit signal's clear
/// deadline and the next turn step, for example) without interfering.
///
/// The anchor must not lie in the future. Waits chained with
/// [`deadline`](Wait::deadline) satisfy this because a wait's deadline is
/// only taken as an anchor once it has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct Wait<I: TimeInstant> {
    anchor: I,
    budget_millis: u64,
}

impl<I: TimeInstant> Wait<I> {
    /// Creates a wait of `millis` starting at `anchor`.
    pub fn new(anchor: I, millis: u64) -> Self {
        Self {
            anchor,
            budget_millis: millis,
        }
    }

    /// The instant this wait's budget runs out.
    ///
    /// Anchoring the next wait at the previous deadline (instead of at the
    /// instant the deadline was noticed) keeps back-to-back waits on cadence
    /// even when servicing runs late. If the instant arithmetic overflows
    /// (wrapping hardware timers), the anchor is returned instead; the
    /// schedule jumps but nothing crashes.
    pub fn deadline(&self) -> I {
        self.anchor
            .checked_add(I::Duration::from_millis(self.budget_millis))
            .unwrap_or(self.anchor)
    }

    /// Returns true once the budget has fully elapsed at `now`.
    pub fn is_elapsed(&self, now: I) -> bool {
        now.duration_since(self.anchor).as_millis() >= self.budget_millis
    }

    /// Time left before the deadline at `now` (zero once elapsed).
    pub fn remaining(&self, now: I) -> I::Duration {
        let elapsed = now.duration_since(self.anchor).as_millis();
        I::Duration::from_millis(self.budget_millis.saturating_sub(elapsed))
    }
}
