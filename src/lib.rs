//! Notechart - rhythm-game note charts from audio
//!
//! Decodes an audio file, detects onsets, and classifies each onset into a
//! left, right, or unbounded note based on its amplitude.

pub mod audio;
pub mod chart;
pub mod config;
pub mod onset;

pub use chart::{classify, Direction, Note};
pub use config::NotechartConfig;
