//! Build command - incrementally rebuild the icon font

use crate::build::{files_to_clean, BuildOutcome, Orchestrator};
use crate::cache::ChangePlan;
use crate::cli::args::Cli;
use crate::config::{BuildConfig, Config, ConfigManager};
use crate::error::StrokeResult;
use crate::transform::{CommandSvgFixer, FantasticonGenerator, ToolCommand};
use crate::ui::{self, UiContext};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Execute a build.
///
/// `config_path` is the explicit or discovered config file, if any. Flags
/// on `cli` override values from the file.
pub async fn execute(cli: &Cli, config_path: Option<PathBuf>, cwd: &Path) -> StrokeResult<()> {
    let mut config = match config_path {
        Some(path) => ConfigManager::with_path(path).load().await?,
        None => Config::default(),
    };
    cli.overrides(cwd).apply(&mut config);
    let config = BuildConfig::from_config(config)?;
    debug!("Build config: {:?}", config);

    let timeout = config.tools.timeout_secs.map(Duration::from_secs);
    let fixer = CommandSvgFixer::new(
        ToolCommand::from_argv(&config.tools.svg_fixer)?.with_timeout(timeout),
    );
    let generator = FantasticonGenerator::new(
        ToolCommand::from_argv(&config.tools.font_generator)?.with_timeout(timeout),
    );

    let ctx = UiContext::detect();
    ui::intro(&ctx, &format!("stroke2font · {}", config.fonts.name));

    let orchestrator = Orchestrator::new(&fixer, &generator, &ctx);
    let plan = orchestrator.plan(&config, cli.force).await?;

    if cli.dry_run {
        print_plan(&ctx, &plan, &config);
        return Ok(());
    }

    match orchestrator.execute(plan, &config).await? {
        BuildOutcome::UpToDate => {
            ui::step_info(&ctx, "No SVG changes detected");
            ui::outro_success(&ctx, "Fonts are up to date");
        }
        BuildOutcome::Built {
            cleaned,
            removed,
            fonts,
        } => {
            if removed > 0 {
                ui::step_warn(&ctx, &format!("Removed {} deleted icon(s)", removed));
            }
            ui::step_ok(&ctx, &format!("Cleaned {} icon(s)", cleaned));
            for file in &fonts.files {
                ui::remark(&ctx, &file.display().to_string());
            }
            ui::outro_success(&ctx, &format!("Built {} glyph(s)", fonts.glyphs));
        }
    }

    Ok(())
}

/// Describe what a build would do
fn print_plan(ctx: &UiContext, plan: &ChangePlan, config: &BuildConfig) {
    ui::section(ctx, "Plan");
    ui::key_value(ctx, "input", &config.input_dir.display().to_string());
    ui::key_value(ctx, "output", &config.output_dir.display().to_string());
    ui::key_value(ctx, "changed", &list_or_none(&plan.changed_files));
    ui::key_value(ctx, "deleted", &list_or_none(&plan.deleted_files));
    ui::key_value(ctx, "options changed", &plan.options_changed.to_string());

    if plan.is_up_to_date() {
        ui::step_info(ctx, "No SVG changes detected");
    } else {
        let to_clean = files_to_clean(plan);
        ui::step_info(
            ctx,
            &format!(
                "Would clean {} icon(s) and regenerate {}",
                to_clean.len(),
                config.fonts.name
            ),
        );
    }
    ui::outro_success(ctx, "Dry run, nothing written");
}

fn list_or_none(files: &[String]) -> String {
    if files.is_empty() {
        "none".to_string()
    } else {
        files.join(", ")
    }
}
