//! Painter

#[macro_use]
extern crate log;

mod notifier;
mod painter;
mod pixels;
mod sampler;
mod shader;

// Re-export.
pub use notifier::*;
pub use painter::*;
pub use pixels::*;
pub use sampler::*;
pub use shader::*;
