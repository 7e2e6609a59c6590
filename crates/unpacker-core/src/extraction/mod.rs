//! Extraction engine and on-disk entry writing.

pub mod engine;
pub mod writer;

pub use engine::ExtractionEngine;
