//! Fully resolved build configuration
//!
//! Merges the config file with command line overrides and checks that
//! everything a build needs is present.

use crate::cache::{FingerprintMode, Manifest};
use crate::config::schema::{Config, ToolsConfig};
use crate::error::{StrokeError, StrokeResult};
use crate::transform::{
    AssetType, FontType, GenerateFontsOptions, SvgFixerOptions, Templates,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Scratch directory (inside the output directory) used to stage icons
/// for the SVG repair tool
pub const SCRATCH_DIR_NAME: &str = "tmp-input";

/// Default cleaned icon directory (inside the output directory)
const CLEANED_DIR_NAME: &str = ".cleaned-svg";

/// Values given on the command line, already resolved to absolute paths
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub selector: Option<String>,
    pub tag: Option<String>,
    pub fonts_url: Option<String>,
    pub template_css: Option<PathBuf>,
}

impl Overrides {
    /// Overwrite config values with every override that is set
    pub fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.icons.input = Some(input);
        }
        if let Some(output) = self.output {
            config.icons.output = Some(output);
        }
        if let Some(name) = self.name {
            config.font.name = Some(name);
        }
        if let Some(prefix) = self.prefix {
            config.font.prefix = prefix;
        }
        if let Some(selector) = self.selector {
            config.font.selector = selector;
        }
        if let Some(tag) = self.tag {
            config.font.tag = tag;
        }
        if let Some(fonts_url) = self.fonts_url {
            config.font.fonts_url = fonts_url;
        }
        if let Some(template_css) = self.template_css {
            config.font.template_css = Some(template_css);
        }
    }
}

/// Options whose change invalidates every cleaned icon.
///
/// Input and output paths are absent so moving a project does not force a
/// rebuild. The cleaned directory is kept relative to the output directory
/// when it lives inside it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveOptions {
    pub cleaned_dir: PathBuf,
    pub svg_fixer_options: SvgFixerOptions,
    pub generate_fonts: FontOptions,
    pub fingerprint_mode: FingerprintMode,
}

/// Font generation options that take part in the options hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOptions {
    pub name: String,
    pub prefix: String,
    pub selector: String,
    pub tag: String,
    pub fonts_url: String,
    pub templates: Templates,
    pub normalize: bool,
    pub font_types: Vec<FontType>,
    pub asset_types: Vec<AssetType>,
}

/// Everything one build needs, with all paths absolute
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Stroke-based source icons
    pub input_dir: PathBuf,

    /// Fonts, CSS and manifest
    pub output_dir: PathBuf,

    /// Persistent repaired icons
    pub cleaned_dir: PathBuf,

    /// How icon identity is established
    pub fingerprint_mode: FingerprintMode,

    /// SVG repair options
    pub svg_fixer: SvgFixerOptions,

    /// Font generation options (input is always `cleaned_dir`)
    pub fonts: GenerateFontsOptions,

    /// External tool commands
    pub tools: ToolsConfig,
}

impl BuildConfig {
    /// Validate a merged config
    pub fn from_config(config: Config) -> StrokeResult<Self> {
        let input_dir = config.icons.input.ok_or(StrokeError::MissingOption("input"))?;
        let output_dir = config.icons.output.ok_or(StrokeError::MissingOption("output"))?;
        let name = config
            .font
            .name
            .filter(|n| !n.is_empty())
            .ok_or(StrokeError::MissingOption("name"))?;
        let cleaned_dir = config
            .icons
            .cleaned
            .unwrap_or_else(|| output_dir.join(CLEANED_DIR_NAME));

        let fingerprint_mode = if config.icons.strict {
            FingerprintMode::Content
        } else {
            FingerprintMode::Metadata
        };

        let fonts = GenerateFontsOptions {
            name,
            input_dir: cleaned_dir.clone(),
            output_dir: output_dir.clone(),
            font_types: config.font.font_types,
            asset_types: config.font.asset_types,
            fonts_url: config.font.fonts_url,
            templates: Templates {
                css: config.font.template_css,
            },
            normalize: config.font.normalize,
            prefix: config.font.prefix,
            selector: config.font.selector,
            tag: config.font.tag,
        };

        Ok(Self {
            input_dir,
            output_dir,
            cleaned_dir,
            fingerprint_mode,
            svg_fixer: config.svg_fixer,
            fonts,
            tools: config.tools,
        })
    }

    /// Staging directory handed to the SVG repair tool
    pub fn scratch_dir(&self) -> PathBuf {
        self.output_dir.join(SCRATCH_DIR_NAME)
    }

    /// Location of the build manifest
    pub fn manifest_path(&self) -> PathBuf {
        Manifest::path_in(&self.output_dir)
    }

    /// The options that are hashed into the manifest
    pub fn effective_options(&self) -> EffectiveOptions {
        let cleaned_dir = self
            .cleaned_dir
            .strip_prefix(&self.output_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.cleaned_dir.clone());

        EffectiveOptions {
            cleaned_dir,
            svg_fixer_options: self.svg_fixer.clone(),
            generate_fonts: FontOptions {
                name: self.fonts.name.clone(),
                prefix: self.fonts.prefix.clone(),
                selector: self.fonts.selector.clone(),
                tag: self.fonts.tag.clone(),
                fonts_url: self.fonts.fonts_url.clone(),
                templates: self.fonts.templates.clone(),
                normalize: self.fonts.normalize,
                font_types: self.fonts.font_types.clone(),
                asset_types: self.fonts.asset_types.clone(),
            },
            fingerprint_mode: self.fingerprint_mode,
        }
    }
}
