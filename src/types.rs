//! Core types: choices, pads, phases, outcomes and errors.

use palette::Srgb;

/// Index of one selectable pad on the panel.
///
/// Valid values are `0..C` for a game built over `C` pads. A `Choice` outside
/// that range must never reach the game; input surfaces should map their
/// buttons straight onto the pad table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Choice(pub u8);

impl Choice {
    /// The choice as a pad-table index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Choice {
    fn from(raw: u8) -> Self {
        Choice(raw)
    }
}

impl From<Choice> for usize {
    fn from(choice: Choice) -> Self {
        choice.index()
    }
}

/// One pad of the panel: the color its signal lights up in and the tone
/// frequency sounded with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pad {
    /// Color shown while this pad's signal is active.
    pub color: Srgb,

    /// Buzzer frequency in hertz for this pad's signal.
    pub tone_hz: u16,
}

impl Pad {
    /// Creates a new pad.
    #[inline]
    pub const fn new(color: Srgb, tone_hz: u16) -> Self {
        Self { color, tone_hz }
    }
}

/// The phase of the turn cycle the game is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Idle. Nothing is scheduled; waiting for a start request.
    AwaitingStart,

    /// Playing the restart flash that opens a new game.
    GameOverAnimation,

    /// Replaying the stored sequence. Input is ignored.
    MachineTurn,

    /// Input gate open; presses are validated against the sequence.
    PlayerTurn,

    /// Success flourish and pause before the next level is issued.
    LevelComplete,

    /// Short dark pause between a wrong press and the restart flash.
    MismatchPause,

    /// Celebratory sweep over every pad after the final level is cleared.
    WinFanfare,
}

/// What a submitted press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// The input gate was closed; the press was discarded.
    Ignored,

    /// Correct choice; more steps remain in this level.
    Matched,

    /// Correct choice completing the level; the flourish is playing.
    LevelCleared,

    /// Correct choice completing the final level; the win fanfare is playing.
    Won,

    /// Wrong choice; the sequence was cleared and a new game will start.
    Mismatched,
}

/// Timing hint returned by `service()` telling the caller when to service
/// the game again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// A deadline is pending. Service again after at most this delay.
    Delay(D),

    /// Nothing is scheduled. Service again after the next external event.
    Idle,
}

/// Game operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// Operation not valid in the current phase.
    InvalidPhase {
        /// Phase(s) the operation is valid in.
        expected: &'static str,
        /// The actual current phase.
        actual: GamePhase,
    },

    /// The sequence store is at capacity; no further level can be issued.
    SequenceFull,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidPhase { expected, actual } => {
                write!(
                    f,
                    "invalid phase: operation requires {expected}, but game is in {actual:?}"
                )
            }
            GameError::SequenceFull => {
                write!(f, "sequence store is full; maximum level reached")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
