//! Font generation via the `fantasticon` command line tool
//!
//! fantasticon compiles the font binaries and a `<name>.json` codepoint map.
//! The stylesheet is rendered here from that map so templates can use the
//! helpers in [`crate::template::helpers`].

use crate::error::{StrokeError, StrokeResult};
use crate::template::{CssContext, CssRenderer};
use crate::transform::process::ToolCommand;
use crate::transform::{AssetType, FontGenerator, FontType, GenerateFontsOptions, GeneratedFonts};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Runs a fantasticon compatible command
pub struct FantasticonGenerator {
    command: ToolCommand,
    name: String,
}

impl FantasticonGenerator {
    /// Create a generator that runs `command`
    pub fn new(command: ToolCommand) -> Self {
        let name = command.display_name();
        Self { command, name }
    }

    /// Arguments appended to the configured command
    fn arguments(options: &GenerateFontsOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            options.input_dir.as_os_str().to_owned(),
            "-o".into(),
            options.output_dir.as_os_str().to_owned(),
            "-n".into(),
            options.name.clone().into(),
        ];
        for font_type in &options.font_types {
            args.push("-t".into());
            args.push(font_type.extension().into());
        }
        args.extend(
            [
                "-g",
                "json",
                "-p",
                options.prefix.as_str(),
                "--selector",
                options.selector.as_str(),
                "--tag",
                options.tag.as_str(),
                "-u",
                options.fonts_url.as_str(),
            ]
            .into_iter()
            .map(OsString::from),
        );
        if options.normalize {
            args.push("--normalize".into());
        }
        args
    }

    async fn read_codepoints(path: &Path) -> StrokeResult<BTreeMap<String, u32>> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| StrokeError::io(format!("reading codepoints {}", path.display()), e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Build the `@font-face` `src:` value, with a content hash per font for
/// cache busting.
async fn font_src(options: &GenerateFontsOptions) -> StrokeResult<String> {
    let base = options.fonts_url.trim_end_matches('/');
    let base = if base.is_empty() { "." } else { base };

    let mut sources = Vec::with_capacity(options.font_types.len());
    for font_type in &options.font_types {
        let file = font_path(options, *font_type);
        let bytes = fs::read(&file)
            .await
            .map_err(|e| StrokeError::io(format!("reading font {}", file.display()), e))?;
        let hash = hex::encode(Sha256::digest(&bytes));

        sources.push(format!(
            "url(\"{}/{}.{}?{}\") format(\"{}\")",
            base,
            options.name,
            font_type.extension(),
            &hash[..12],
            font_type.css_format()
        ));
    }
    Ok(sources.join(", "))
}

fn font_path(options: &GenerateFontsOptions, font_type: FontType) -> PathBuf {
    options
        .output_dir
        .join(format!("{}.{}", options.name, font_type.extension()))
}

#[async_trait]
impl FontGenerator for FantasticonGenerator {
    async fn generate(&self, options: &GenerateFontsOptions) -> StrokeResult<GeneratedFonts> {
        fs::create_dir_all(&options.output_dir).await.map_err(|e| {
            StrokeError::io(format!("creating {}", options.output_dir.display()), e)
        })?;

        info!(
            "Generating {} font(s) for {}",
            options.font_types.len(),
            options.name
        );
        self.command.run(Self::arguments(options)).await?;

        let mut files: Vec<PathBuf> = options
            .font_types
            .iter()
            .map(|t| font_path(options, *t))
            .collect();

        let json_path = options.output_dir.join(format!("{}.json", options.name));
        let codepoints = Self::read_codepoints(&json_path).await?;
        debug!("Font contains {} glyph(s)", codepoints.len());

        if options.asset_types.contains(&AssetType::Css) {
            let renderer = CssRenderer::load(options.templates.css.as_deref()).await?;
            let context = CssContext {
                name: options.name.clone(),
                font_src: font_src(options).await?,
                codepoints: codepoints.clone(),
                prefix: options.prefix.clone(),
                selector: options.selector.clone(),
                tag: options.tag.clone(),
            };
            let css = renderer.render(&context)?;

            let css_path = options.output_dir.join(format!("{}.css", options.name));
            fs::write(&css_path, css)
                .await
                .map_err(|e| StrokeError::io(format!("writing {}", css_path.display()), e))?;
            files.push(css_path);
        }

        if options.asset_types.contains(&AssetType::Json) {
            files.push(json_path);
        } else {
            fs::remove_file(&json_path).await.map_err(|e| {
                StrokeError::io(format!("removing {}", json_path.display()), e)
            })?;
        }

        Ok(GeneratedFonts {
            files,
            glyphs: codepoints.len(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Templates;
    use tempfile::TempDir;

    fn options(dir: &Path) -> GenerateFontsOptions {
        GenerateFontsOptions {
            name: "icons".to_string(),
            input_dir: dir.join("cleaned"),
            output_dir: dir.join("out"),
            font_types: vec![FontType::Woff2, FontType::Woff],
            asset_types: vec![AssetType::Css],
            fonts_url: "./".to_string(),
            templates: Templates::default(),
            normalize: true,
            prefix: "i".to_string(),
            selector: "icon".to_string(),
            tag: "i".to_string(),
        }
    }

    #[test]
    fn arguments_cover_every_option() {
        let opts = options(Path::new("/work"));
        let args: Vec<String> = FantasticonGenerator::arguments(&opts)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "/work/cleaned", "-o", "/work/out", "-n", "icons", "-t", "woff2", "-t", "woff",
                "-g", "json", "-p", "i", "--selector", "icon", "--tag", "i", "-u", "./",
                "--normalize",
            ]
        );
    }

    #[tokio::test]
    async fn font_src_hashes_each_font() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path());
        std::fs::create_dir_all(&opts.output_dir).unwrap();
        std::fs::write(opts.output_dir.join("icons.woff2"), b"woff2").unwrap();
        std::fs::write(opts.output_dir.join("icons.woff"), b"woff").unwrap();

        let src = font_src(&opts).await.unwrap();
        let parts: Vec<&str> = src.split(", ").collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("url(\"./icons.woff2?"));
        assert!(parts[0].ends_with("format(\"woff2\")"));
        assert!(parts[1].starts_with("url(\"./icons.woff?"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn generate_renders_css_from_codepoints() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path());

        // Stand-in: $2 is the -o value, $4 the -n value
        let script = r#"
            out="$2"; name="$4"
            printf woff2 > "$out/$name.woff2"
            printf woff > "$out/$name.woff"
            printf '{"arrow": 61697}' > "$out/$name.json"
        "#;
        let command = ToolCommand::from_argv(&[
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
        ])
        .unwrap();

        let result = FantasticonGenerator::new(command)
            .generate(&opts)
            .await
            .unwrap();

        assert_eq!(result.glyphs, 1);
        let css = std::fs::read_to_string(opts.output_dir.join("icons.css")).unwrap();
        assert!(css.contains(".i-arrow:before"));
        assert!(css.contains("icons.woff2?"));
        // json was not requested as an asset
        assert!(!opts.output_dir.join("icons.json").exists());
        assert_eq!(result.files.len(), 3);
    }
}
