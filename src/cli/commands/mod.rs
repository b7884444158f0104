//! CLI command implementations

pub mod build;

pub use build::execute as build;
