//! Configuration schema for stroke2font
//!
//! Configuration is read from `stroke2font.toml`:
//!
//! ```toml
//! [icons]
//! input = "icons"
//! output = "dist/font"
//!
//! [font]
//! name = "my-icons"
//! prefix = "i"
//! ```

use crate::transform::{AssetType, FontType, SvgFixerOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Icon source and output locations
    pub icons: IconsConfig,

    /// Font and stylesheet settings
    pub font: FontConfig,

    /// Options passed to the SVG repair tool
    pub svg_fixer: SvgFixerOptions,

    /// External tool commands
    pub tools: ToolsConfig,
}

impl Config {
    /// Resolve every relative path against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.icons.input,
            &mut self.icons.output,
            &mut self.icons.cleaned,
            &mut self.font.template_css,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Icon locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Directory of stroke-based source icons
    pub input: Option<PathBuf>,

    /// Directory receiving fonts, CSS and the build manifest
    pub output: Option<PathBuf>,

    /// Directory of repaired icons (default: `<output>/.cleaned-svg`)
    pub cleaned: Option<PathBuf>,

    /// Also compare file contents, not just size and mtime
    pub strict: bool,
}

/// Font generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font family name
    pub name: Option<String>,

    /// CSS class prefix
    pub prefix: String,

    /// Base selector class
    pub selector: String,

    /// Tag targeted when selector isn't used
    pub tag: String,

    /// URL used in `@font-face` sources
    pub fonts_url: String,

    /// Handlebars template for the stylesheet
    pub template_css: Option<PathBuf>,

    /// Font binaries to produce
    pub font_types: Vec<FontType>,

    /// Auxiliary assets to produce
    pub asset_types: Vec<AssetType>,

    /// Scale glyphs to the same height
    pub normalize: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: None,
            prefix: "i".to_string(),
            selector: "icon".to_string(),
            tag: "i".to_string(),
            fonts_url: "./".to_string(),
            template_css: None,
            font_types: vec![FontType::Woff2, FontType::Woff],
            asset_types: vec![AssetType::Css],
            normalize: true,
        }
    }
}

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Command for the SVG repair tool
    pub svg_fixer: Vec<String>,

    /// Command for the font generator
    pub font_generator: Vec<String>,

    /// Abort a tool that runs longer than this many seconds
    pub timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            svg_fixer: vec!["oslllo-svg-fixer".to_string()],
            font_generator: vec!["fantasticon".to_string()],
            timeout_secs: None,
        }
    }
}
