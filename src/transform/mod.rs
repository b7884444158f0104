//! External transforms
//!
//! The two expensive steps of a build are delegated to external tools:
//! - SVG repair: converts stroke-based icons into filled outlines
//! - Font generation: compiles the cleaned icons into WOFF/WOFF2 + CSS
//!
//! Both are behind traits so the build pipeline can be driven by the
//! process-backed implementations in production and by fakes in tests.

mod fantasticon;
mod process;
mod svg_fixer;

pub use fantasticon::FantasticonGenerator;
pub use process::ToolCommand;
pub use svg_fixer::CommandSvgFixer;

use crate::error::StrokeResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Options forwarded to the SVG repair tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgFixerOptions {
    /// Let the tool draw its own progress output
    pub show_progress: bool,

    /// Fail instead of creating the destination directory
    pub throw_if_destination_does_not_exist: bool,
}

impl Default for SvgFixerOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
            throw_if_destination_does_not_exist: false,
        }
    }
}

/// Font binary formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    Woff2,
    Woff,
    Ttf,
    Eot,
    Svg,
}

impl FontType {
    /// File extension (and CSS `format()` hint) for this font type
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Woff2 => "woff2",
            Self::Woff => "woff",
            Self::Ttf => "ttf",
            Self::Eot => "eot",
            Self::Svg => "svg",
        }
    }

    /// Value for the CSS `format()` hint
    pub fn css_format(&self) -> &'static str {
        match self {
            Self::Ttf => "truetype",
            Self::Eot => "embedded-opentype",
            other => other.extension(),
        }
    }
}

impl fmt::Display for FontType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Auxiliary assets generated next to the fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Stylesheet rendered from the CSS template
    Css,
    /// Glyph name to codepoint map
    Json,
}

/// Template overrides for generated assets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templates {
    /// Handlebars template for the stylesheet (embedded default when unset)
    pub css: Option<PathBuf>,
}

/// Everything the font generator needs for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateFontsOptions {
    /// Font family name, also the base name of every output file
    pub name: String,

    /// Directory of cleaned icons (always the full set)
    pub input_dir: PathBuf,

    /// Directory receiving fonts and assets
    pub output_dir: PathBuf,

    /// Font binaries to produce
    pub font_types: Vec<FontType>,

    /// Auxiliary assets to produce
    pub asset_types: Vec<AssetType>,

    /// URL prefix used for `@font-face` sources
    pub fonts_url: String,

    /// Template overrides
    pub templates: Templates,

    /// Scale glyphs to the same height
    pub normalize: bool,

    /// CSS class prefix
    pub prefix: String,

    /// Base selector class
    pub selector: String,

    /// Tag targeted when no selector is used
    pub tag: String,
}

/// Files written by a font generation run
#[derive(Debug, Clone, Default)]
pub struct GeneratedFonts {
    /// Paths of every file produced
    pub files: Vec<PathBuf>,

    /// Number of glyphs in the font
    pub glyphs: usize,
}

/// SVG repair step
#[async_trait]
pub trait SvgFixer: Send + Sync {
    /// Repair every icon in `source_dir`, writing results into `dest_dir`
    async fn fix(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        options: &SvgFixerOptions,
    ) -> StrokeResult<()>;

    /// Human-readable name for progress output
    fn name(&self) -> &str;
}

/// Font compilation step
#[async_trait]
pub trait FontGenerator: Send + Sync {
    /// Build fonts and assets from the complete cleaned icon set
    async fn generate(&self, options: &GenerateFontsOptions) -> StrokeResult<GeneratedFonts>;

    /// Human-readable name for progress output
    fn name(&self) -> &str;
}
