//! Transcript Generator
//!
//! Randomized ATIS broadcasts built from a fixed template grammar.

mod generator;
pub mod vocabulary;

pub use generator::{
    generate_transcript, AtisReport, CloudClause, WindClause, ALTIMETER_RANGE, DEW_POINT_SPREAD,
    TEMPERATURE_RANGE,
};
