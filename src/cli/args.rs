//! CLI argument definitions using clap derive

use crate::config::Overrides;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// stroke2font - Incremental icon font builder
///
/// Repairs stroke-based SVG icons and compiles them into WOFF/WOFF2 fonts
/// plus a stylesheet, redoing only the work that changed since the last
/// successful build.
#[derive(Parser, Debug)]
#[command(name = "stroke2font")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "STROKE2FONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of stroke-based SVG icons
    #[arg(short, long, visible_alias = "in", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory receiving fonts, CSS and the build manifest
    #[arg(short, long, visible_alias = "out", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Font family name
    #[arg(short, long)]
    pub name: Option<String>,

    /// CSS class prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Base selector class
    #[arg(long)]
    pub selector: Option<String>,

    /// Tag targeted when no selector is used
    #[arg(long)]
    pub tag: Option<String>,

    /// URL used for `@font-face` sources
    #[arg(long, alias = "fontsURL", value_name = "URL")]
    pub fonts_url: Option<String>,

    /// Handlebars template for the stylesheet
    #[arg(long, alias = "templateCSS", value_name = "FILE")]
    pub template_css: Option<PathBuf>,

    /// Ignore the previous build manifest and rebuild everything
    #[arg(long)]
    pub force: bool,

    /// Show what would be rebuilt without running any tool
    #[arg(long)]
    pub dry_run: bool,

    /// Skip local stroke2font.toml discovery
    #[arg(long)]
    pub no_local: bool,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl Cli {
    /// Whether the flags alone describe a build
    pub fn has_required_flags(&self) -> bool {
        self.input.is_some() && self.output.is_some() && self.name.is_some()
    }

    /// Flag values as config overrides, with paths resolved against `cwd`
    pub fn overrides(&self, cwd: &Path) -> Overrides {
        let resolve = |p: &PathBuf| cwd.join(p);
        Overrides {
            input: self.input.as_ref().map(resolve),
            output: self.output.as_ref().map(resolve),
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            selector: self.selector.clone(),
            tag: self.tag.clone(),
            fonts_url: self.fonts_url.clone(),
            template_css: self.template_css.as_ref().map(resolve),
        }
    }
}
