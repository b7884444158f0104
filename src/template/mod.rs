//! CSS generation from Handlebars templates
//!
//! Helpers are registered on a renderer when it is created; there is no
//! process-wide registry.

mod css;
pub mod helpers;

pub use css::{CssContext, CssRenderer, DEFAULT_CSS_TEMPLATE};
