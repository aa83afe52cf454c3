//! Signal presentation: timed cues, fixed animations and the output traits.
//!
//! A [`Cue`] is one timed presentation step telling the panel what to show and
//! the buzzer what to sound. The game applies a cue's effects at its onset and
//! holds its duration as a pending wait; nothing in this module blocks.

use crate::types::{Choice, Pad};
use palette::Srgb;

/// Trait for the game's visual surface.
///
/// Implement this for whatever shows the signals: an RGB LED, four lamp-lit
/// arcade buttons, a row of terminal cells. Implementations handle hardware
/// errors internally; these methods cannot fail.
pub trait GamePanel {
    /// Lights the signal for `choice`. `color` is that pad's configured color.
    fn show_signal(&mut self, choice: Choice, color: Srgb);

    /// Returns the panel to its idle, unlit presentation.
    ///
    /// Implementations backed by a single RGB LED typically write
    /// [`COLOR_OFF`](crate::COLOR_OFF) here.
    fn clear_signal(&mut self);

    /// Reflects whether player input is currently accepted, e.g. by dimming
    /// the pads. Called only when the gate actually changes.
    fn set_input_enabled(&mut self, enabled: bool);
}

/// Trait for the tone generator.
///
/// Tones are fire-and-forget: the game never waits on one, and a new call may
/// arrive while a previous tone is still sounding. Monophonic hardware should
/// simply replace the active tone.
pub trait Buzzer {
    /// Sounds `frequency_hz` for `duration_ms` milliseconds.
    fn tone(&mut self, frequency_hz: u16, duration_ms: u32);
}

/// What a cue does with the panel lamp at its onset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    /// Light the given choice's signal.
    On(Choice),

    /// Darken the panel.
    Off,

    /// Leave the lamp as it is.
    Hold,
}

/// What a cue sounds at its onset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    /// The configured tone of the pad named by the cue's lamp.
    /// Silent unless the lamp is [`Lamp::On`].
    OfPad,

    /// A literal frequency in hertz.
    Fixed(u16),

    /// No tone.
    Silent,
}

/// One timed presentation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cue {
    /// Lamp action applied at the cue's onset.
    pub lamp: Lamp,

    /// Tone sounded at the cue's onset.
    pub tone: Tone,

    /// How long the cue lasts before the next step takes over.
    pub millis: u32,
}

impl Cue {
    /// A lit signal sounding its pad's tone.
    pub const fn signal(choice: Choice, millis: u32) -> Self {
        Self {
            lamp: Lamp::On(choice),
            tone: Tone::OfPad,
            millis,
        }
    }

    /// A dark, silent step.
    pub const fn rest(millis: u32) -> Self {
        Self {
            lamp: Lamp::Off,
            tone: Tone::Silent,
            millis,
        }
    }

    /// A tone-only step that leaves the lamp alone.
    pub const fn beep(frequency_hz: u16, millis: u32) -> Self {
        Self {
            lamp: Lamp::Hold,
            tone: Tone::Fixed(frequency_hz),
            millis,
        }
    }

    /// A silent step that leaves the lamp alone.
    pub const fn hold(millis: u32) -> Self {
        Self {
            lamp: Lamp::Hold,
            tone: Tone::Silent,
            millis,
        }
    }

    /// Applies the cue's onset effects to the panel and buzzer.
    ///
    /// # Panics
    /// Panics if the cue lights a choice outside `pads`. Such a cue is a
    /// programming error, not a runtime condition.
    pub fn apply<P: GamePanel, B: Buzzer>(&self, pads: &[Pad], panel: &mut P, buzzer: &mut B) {
        match self.lamp {
            Lamp::On(choice) => panel.show_signal(choice, pads[choice.index()].color),
            Lamp::Off => panel.clear_signal(),
            Lamp::Hold => {}
        }

        let frequency = match (self.tone, self.lamp) {
            (Tone::OfPad, Lamp::On(choice)) => Some(pads[choice.index()].tone_hz),
            (Tone::OfPad, _) => None,
            (Tone::Fixed(hz), _) => Some(hz),
            (Tone::Silent, _) => None,
        };

        if let Some(hz) = frequency {
            buzzer.tone(hz, self.millis);
        }
    }
}

/// The restart flash that opens every game: the first pad's signal twice at
/// 500 ms each, then a second of dark before level one is issued.
///
/// The two signals run back to back, so the lamp relights without a visible
/// gap while the tone sounds twice.
pub const GAME_OVER_FLASH: [Cue; 3] = [
    Cue::signal(Choice(0), 500),
    Cue::signal(Choice(0), 500),
    Cue::rest(1000),
];

/// The success flourish played when a level is cleared: three ascending tones
/// at 0, 150 and 300 ms, padded out to the full second that separates the
/// clearing press from the next level.
///
/// Every step holds the lamp so the press feedback signal can finish
/// underneath the first tones.
pub const SUCCESS_FLOURISH: [Cue; 6] = [
    Cue::beep(600, 100),
    Cue::hold(50),
    Cue::beep(700, 100),
    Cue::hold(50),
    Cue::beep(800, 150),
    Cue::hold(550),
];
