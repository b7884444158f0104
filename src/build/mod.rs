//! Build orchestration
//!
//! Turns a [`ChangePlan`] into the minimum amount of external work:
//!
//! 1. Remove cleaned copies of deleted icons
//! 2. Re-clean changed icons (every icon when the options changed) through a
//!    scratch directory
//! 3. Regenerate the font from the complete cleaned set
//! 4. Commit the new manifest
//!
//! The manifest is only written once every step succeeded, so a failed
//! build is re-evaluated from the same starting point next time.

pub mod staging;

use crate::cache::{self, list_input_files, ChangePlan, Manifest};
use crate::config::BuildConfig;
use crate::error::{StrokeError, StrokeResult};
use crate::transform::{FontGenerator, GeneratedFonts, SvgFixer};
use crate::ui::{StagingProgress, TaskSpinner, UiContext};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Result of a build
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// Nothing changed since the last successful build
    UpToDate,

    /// External transforms ran and the manifest was committed
    Built {
        /// Icons passed through the SVG repair tool
        cleaned: usize,
        /// Cleaned icons removed because their source disappeared
        removed: usize,
        /// Files written by the font generator
        fonts: GeneratedFonts,
    },
}

/// Icons that must go through the SVG repair tool for `plan`.
///
/// An options change invalidates every cleaned icon, otherwise only the
/// changed ones are redone.
pub fn files_to_clean(plan: &ChangePlan) -> Vec<String> {
    if plan.options_changed {
        plan.all_files()
    } else {
        plan.changed_files.clone()
    }
}

/// Drives the external transforms for one output directory
pub struct Orchestrator<'a> {
    fixer: &'a dyn SvgFixer,
    generator: &'a dyn FontGenerator,
    ui: &'a UiContext,
}

impl<'a> Orchestrator<'a> {
    pub fn new(fixer: &'a dyn SvgFixer, generator: &'a dyn FontGenerator, ui: &'a UiContext) -> Self {
        Self { fixer, generator, ui }
    }

    /// Compare the input directory with the last successful build.
    ///
    /// With `force` the previous manifest is ignored, which makes every
    /// icon count as changed.
    pub async fn plan(&self, config: &BuildConfig, force: bool) -> StrokeResult<ChangePlan> {
        if !config.input_dir.is_dir() {
            return Err(StrokeError::PathNotFound(config.input_dir.clone()));
        }

        let previous = if force {
            debug!("Ignoring previous manifest (--force)");
            None
        } else {
            Manifest::load(&config.manifest_path()).await?
        };

        cache::plan(
            &config.input_dir,
            previous.as_ref(),
            &config.effective_options(),
            config.fingerprint_mode,
        )
        .await
    }

    /// Plan and execute a build
    pub async fn run(&self, config: &BuildConfig, force: bool) -> StrokeResult<BuildOutcome> {
        let plan = self.plan(config, force).await?;
        self.execute(plan, config).await
    }

    /// Carry out `plan`
    pub async fn execute(&self, plan: ChangePlan, config: &BuildConfig) -> StrokeResult<BuildOutcome> {
        if plan.is_up_to_date() {
            info!("No SVG changes detected, skipping build");
            return Ok(BuildOutcome::UpToDate);
        }

        staging::ensure_dir(&config.cleaned_dir).await?;

        let mut removed = 0;
        for rel in &plan.deleted_files {
            if staging::remove_file_if_exists(&config.cleaned_dir.join(rel)).await? {
                removed += 1;
            }
        }
        if !plan.prior_manifest_existed || plan.options_changed {
            removed += self.prune_orphans(&plan, config).await?;
        }

        let to_clean = files_to_clean(&plan);
        if !to_clean.is_empty() {
            self.clean(&to_clean, config).await?;
        }

        // Font compilation is not incremental: always the full cleaned set
        let fonts = self.generate(config).await?;

        plan.next_manifest.save(&config.manifest_path()).await?;

        Ok(BuildOutcome::Built {
            cleaned: to_clean.len(),
            removed,
            fonts,
        })
    }

    /// Drop any cleaned icon whose source is gone. Needed when there is no
    /// deletion list to go by, or when the cleaned directory itself moved.
    async fn prune_orphans(&self, plan: &ChangePlan, config: &BuildConfig) -> StrokeResult<usize> {
        let current: BTreeSet<String> = plan.all_files().into_iter().collect();
        let mut pruned = 0;
        for rel in list_input_files(&config.cleaned_dir).await? {
            if !current.contains(&rel) {
                debug!("Pruning orphaned cleaned icon {}", rel);
                if staging::remove_file_if_exists(&config.cleaned_dir.join(&rel)).await? {
                    pruned += 1;
                }
            }
        }
        Ok(pruned)
    }

    /// Stage `files` into a fresh scratch directory and repair them into
    /// the cleaned directory
    async fn clean(&self, files: &[String], config: &BuildConfig) -> StrokeResult<()> {
        let scratch = config.scratch_dir();
        staging::reset_dir(&scratch).await?;

        let progress = StagingProgress::new(self.ui, files.len() as u64);
        for rel in files {
            staging::copy_file(&config.input_dir.join(rel), &scratch.join(rel)).await?;
            progress.inc(rel);
        }
        progress.finish();

        let mut spinner = TaskSpinner::new(self.ui);
        spinner.start(&format!(
            "Repairing {} icon(s) with {}",
            files.len(),
            self.fixer.name()
        ));
        if let Err(e) = self
            .fixer
            .fix(&scratch, &config.cleaned_dir, &config.svg_fixer)
            .await
        {
            spinner.stop_error("SVG repair failed");
            return Err(e);
        }
        spinner.stop(&format!("Repaired {} icon(s)", files.len()));

        remove_scratch(&scratch).await
    }

    async fn generate(&self, config: &BuildConfig) -> StrokeResult<GeneratedFonts> {
        let mut spinner = TaskSpinner::new(self.ui);
        spinner.start(&format!(
            "Generating {} with {}",
            config.fonts.name,
            self.generator.name()
        ));
        match self.generator.generate(&config.fonts).await {
            Ok(fonts) => {
                spinner.stop(&format!(
                    "Generated {} ({} glyph(s))",
                    config.fonts.name, fonts.glyphs
                ));
                Ok(fonts)
            }
            Err(e) => {
                spinner.stop_error("Font generation failed");
                Err(e)
            }
        }
    }
}

async fn remove_scratch(scratch: &Path) -> StrokeResult<()> {
    staging::remove_dir_if_exists(scratch).await?;
    debug!("Removed scratch directory {}", scratch.display());
    Ok(())
}
