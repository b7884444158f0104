//! Progress indicators with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner around a long-running external tool
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

/// Progress bar for copying icons into the scratch directory.
///
/// Plain mode prints a single summary line instead of one line per icon.
pub struct StagingProgress {
    bar: Option<ProgressBar>,
}

impl StagingProgress {
    pub fn new(ctx: &UiContext, total: u64) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.magenta} Staging  {bar:20.magenta/dim} {pos}/{len} {msg:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("━╸─"),
            );
            Some(bar)
        } else {
            println!("{} Staging {} icon(s)", style("...").dim(), total);
            None
        };
        Self { bar }
    }

    /// Record one staged icon
    pub fn inc(&self, name: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(name.to_string());
            bar.inc(1);
        }
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Repairing...");
        spinner.stop("Done");
        spinner.start("Generating...");
        spinner.stop_error("Failed");
    }

    #[test]
    fn staging_progress_non_interactive() {
        let ctx = UiContext::non_interactive();
        let progress = StagingProgress::new(&ctx, 2);
        progress.inc("a.svg");
        progress.inc("b.svg");
        progress.finish();
    }
}
