use crate::types::{Choice, GameError};
use heapless::Vec;
use rand::{Rng, RngCore};

/// The ordered list of choices the machine has issued this game.
///
/// Grows by one random choice per level and is replayed in full every machine
/// turn. Append-only while a game runs; cleared when the game ends.
///
/// # Type Parameters
/// * `N` - Maximum number of choices the store can hold. This doubles as the
///   game's maximum level: once the store is full no further level can be
///   issued.
#[derive(Debug, Clone, Default)]
pub struct GameSequence<const N: usize> {
    entries: Vec<Choice, N>,
}

impl<const N: usize> GameSequence<N> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Draws one choice uniformly from `[0, choice_count)` and appends it.
    ///
    /// Every draw is independent; consecutive duplicates are permitted and
    /// must be reproduced like any other entry.
    ///
    /// # Errors
    /// * `SequenceFull` - The store already holds `N` entries
    ///
    /// # Panics
    /// Panics (in debug builds) if `choice_count` is zero or exceeds the
    /// `Choice` value range.
    pub fn append_random<R: RngCore>(
        &mut self,
        rng: &mut R,
        choice_count: usize,
    ) -> Result<Choice, GameError> {
        debug_assert!(
            choice_count >= 1 && choice_count <= u8::MAX as usize,
            "choice_count must fit the Choice value range"
        );

        let choice = Choice(rng.random_range(0..choice_count as u8));
        self.entries
            .push(choice)
            .map_err(|_| GameError::SequenceFull)?;
        Ok(choice)
    }

    /// Returns the number of choices issued so far.
    ///
    /// While a game runs this is the current level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no choices have been issued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true once the maximum level has been issued.
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Returns the choice at `position`, if one has been issued.
    pub fn get(&self, position: usize) -> Option<Choice> {
        self.entries.get(position).copied()
    }

    /// Returns all issued choices in order, oldest first.
    pub fn as_slice(&self) -> &[Choice] {
        &self.entries
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
