//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod color;
pub mod common;
pub mod global_index;
pub mod paintbrush;
pub mod rng;
