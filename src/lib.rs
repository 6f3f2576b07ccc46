//! Chemical hazard database dashboard: data pipeline and session state.
//!
//! The `data` modules are plain functions over an immutable [`data::model::Dataset`];
//! `state` wires them to the user's selections. The egui shell lives in the binary.

pub mod color;
pub mod config;
pub mod data;
pub mod state;
