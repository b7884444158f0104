//! stroke2font - Incremental icon font builder
//!
//! Converts a directory of stroke-based SVG icons into WOFF/WOFF2 fonts and
//! a stylesheet, skipping the expensive repair and compile steps when
//! nothing changed since the last successful build.

pub mod build;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod template;
pub mod transform;
pub mod ui;

pub use error::{StrokeError, StrokeResult};
