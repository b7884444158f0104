//! Stylesheet rendering

use crate::error::{StrokeError, StrokeResult};
use crate::template::helpers::register_helpers;
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Template used when no `template_css` is configured
pub const DEFAULT_CSS_TEMPLATE: &str = include_str!("../../templates/default.css.hbs");

const TEMPLATE_NAME: &str = "css";

/// Values exposed to the CSS template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssContext {
    /// Font family name
    pub name: String,

    /// Ready-to-use `src:` value for `@font-face`
    pub font_src: String,

    /// Glyph name to codepoint
    pub codepoints: BTreeMap<String, u32>,

    /// CSS class prefix
    pub prefix: String,

    /// Base selector class (may be empty)
    pub selector: String,

    /// Tag targeted when no selector is used
    pub tag: String,
}

/// Handlebars renderer with the stylesheet template and helpers registered
pub struct CssRenderer {
    registry: Handlebars<'static>,
}

impl CssRenderer {
    /// Build a renderer for a template string
    pub fn from_template(template: &str) -> StrokeResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut registry);
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| StrokeError::Template(e.to_string()))?;
        Ok(Self { registry })
    }

    /// Build a renderer from a template file, or the embedded default
    pub async fn load(template_path: Option<&Path>) -> StrokeResult<Self> {
        match template_path {
            Some(path) => {
                debug!("Loading CSS template {}", path.display());
                let template = fs::read_to_string(path).await.map_err(|e| {
                    StrokeError::io(format!("reading CSS template {}", path.display()), e)
                })?;
                Self::from_template(&template)
            }
            None => Self::from_template(DEFAULT_CSS_TEMPLATE),
        }
    }

    /// Render the stylesheet
    pub fn render(&self, context: &CssContext) -> StrokeResult<String> {
        self.registry
            .render(TEMPLATE_NAME, context)
            .map_err(|e| StrokeError::Template(e.to_string()))
    }
}
