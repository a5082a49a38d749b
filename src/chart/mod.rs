//! Chart building
//!
//! The decision core of the pipeline: classifies detected onsets into
//! directional notes and serializes them to the chart text format.

mod classifier;
mod writer;

pub use classifier::{
    classify, ClassifierConfig, ClassifierState, ClassifyError, Direction, Note,
};
pub use writer::ChartWriter;
