//! Core domain definitions for the customer dataset.
//!
//! This module names the columns the pipeline touches, the literal
//! replacement rules applied to them, and the ordered list of stages.

pub mod domain;

pub use domain::{Stage, REQUIRED_COLUMNS};
