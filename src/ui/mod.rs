//! Terminal output for build progress
//!
//! Uses `cliclack` in interactive terminals and falls back to plain,
//! line-oriented output in CI and when stdout is piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use stroke2font::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "stroke2font");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Generating icons...");
//! spinner.stop("Generated icons (42 glyphs)");
//!
//! ui::outro_success(&ctx, "Build complete");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{intro, key_value, outro_success, remark, section, step_info, step_ok, step_warn};
pub use progress::{StagingProgress, TaskSpinner};
pub use theme::{init_theme, StrokeTheme};
