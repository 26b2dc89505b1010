//! Report scoring pipeline.
//!
//! Stages run strictly forward: basic-data checks, sequestration estimate,
//! anomaly score, confidence score, then status and notes. Every stage is a
//! pure function of the report and the rule table.

pub mod anomaly;
pub mod biomass;
pub mod confidence;
pub mod decision;
pub mod input_check;
pub mod pipeline;
pub mod sequestration;

pub use pipeline::{evaluate, evaluate_at, DetailedAnalysis, ValidationResult};
