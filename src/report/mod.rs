//! Report module - sinks that consume finished analysis results

pub mod chart;
pub mod export;
pub mod summary;

pub use chart::*;
pub use export::*;
pub use summary::*;
