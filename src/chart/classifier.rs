//! Direction classifier
//!
//! Turns a time-ordered onset sequence into left/right note picks using the
//! parity of each onset's amplitude, with two adjustments: onsets louder than
//! the configured ceiling become unbounded notes and are excluded from
//! balancing, and runs of identical picks are broken before they reach four.

use crate::onset::Onset;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("onset sequence is empty")]
    EmptyOnsets,
}

/// Lane a note is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left lane
    Left,
    /// Right lane
    Right,
    /// Amplitude above the configured ceiling; excluded from lane balancing
    Unbounded,
}

impl Direction {
    /// Binary pick from amplitude parity: odd integer part is left,
    /// even is right.
    fn from_amplitude(amplitude: f32) -> Self {
        if amplitude as i64 % 2 == 1 {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Swap left and right. Unbounded is its own opposite.
    fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Unbounded => Direction::Unbounded,
        }
    }

    /// Single-letter chart label
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Unbounded => "U",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chart entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    /// Milliseconds from the start of the audio, truncated toward zero
    pub time_ms: i64,

    /// Assigned lane
    pub direction: Direction,
}

/// Classifier settings, immutable for a run
#[derive(Debug, Clone, Copy)]
pub struct ClassifierConfig {
    /// Onsets strictly louder than this become unbounded notes
    pub amplitude_upper_bound: i32,
}

impl ClassifierConfig {
    /// Default amplitude ceiling
    pub const DEFAULT_UPPER_BOUND: i32 = 50;
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            amplitude_upper_bound: Self::DEFAULT_UPPER_BOUND,
        }
    }
}

/// Running classification state
///
/// One onset in, one note out. `classify` drives this over a whole sequence;
/// it can also be stepped manually to classify incrementally. Not meant to be
/// shared between threads mid-run: `current`/`streak` updates are not atomic
/// with emission.
#[derive(Debug, Clone)]
pub struct ClassifierState {
    config: ClassifierConfig,
    current: Direction,
    streak: u32,
}

impl ClassifierState {
    /// Seed the state from the first onset of the sequence.
    ///
    /// The seed parity is taken from the first onset's amplitude even when
    /// that onset itself lands above the ceiling and will be emitted as
    /// unbounded.
    pub fn new(first: &Onset, config: ClassifierConfig) -> Self {
        Self {
            config,
            current: Direction::from_amplitude(first.amplitude),
            streak: 0,
        }
    }

    /// Classify one onset and advance the state.
    pub fn step(&mut self, onset: &Onset) -> Note {
        let time_ms = (onset.time * 1000.0) as i64;

        // Out-of-range onsets bypass the streak accounting entirely.
        if onset.amplitude > self.config.amplitude_upper_bound as f32 {
            return Note {
                time_ms,
                direction: Direction::Unbounded,
            };
        }

        let mut pick = Direction::from_amplitude(onset.amplitude);
        if pick != self.current {
            self.streak = 0;
        } else {
            self.streak += 1;
        }

        // Break the run before a fourth identical pick lands.
        if self.streak >= 3 {
            pick = pick.flipped();
            self.streak = 0;
        }

        self.current = pick;
        Note {
            time_ms,
            direction: pick,
        }
    }
}

/// Classify a time-ordered onset sequence into notes.
///
/// Produces exactly one note per onset, in input order. The sequence is
/// assumed already sorted by time; ordering is not checked. An empty
/// sequence is an error: there is nothing to seed the lane balancing from.
pub fn classify(onsets: &[Onset], config: ClassifierConfig) -> Result<Vec<Note>, ClassifyError> {
    let first = onsets.first().ok_or(ClassifyError::EmptyOnsets)?;
    let mut state = ClassifierState::new(first, config);
    Ok(onsets.iter().map(|onset| state.step(onset)).collect())
}
