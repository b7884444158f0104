//! SVG repair via the `oslllo-svg-fixer` command line tool

use crate::error::StrokeResult;
use crate::transform::process::ToolCommand;
use crate::transform::{SvgFixer, SvgFixerOptions};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tracing::info;

/// Runs an svg-fixer compatible command: `<cmd> -s <src> -d <dest> [flags]`
pub struct CommandSvgFixer {
    command: ToolCommand,
    name: String,
}

impl CommandSvgFixer {
    /// Create a fixer that runs `command`
    pub fn new(command: ToolCommand) -> Self {
        let name = command.display_name();
        Self { command, name }
    }

    /// Arguments appended to the configured command
    fn arguments(source_dir: &Path, dest_dir: &Path, options: &SvgFixerOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-s".into(),
            source_dir.as_os_str().to_owned(),
            "-d".into(),
            dest_dir.as_os_str().to_owned(),
        ];
        if options.show_progress {
            args.push("--show-progress".into());
        }
        if options.throw_if_destination_does_not_exist {
            args.push("--throw-if-destination-does-not-exist".into());
        }
        args
    }
}

#[async_trait]
impl SvgFixer for CommandSvgFixer {
    async fn fix(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        options: &SvgFixerOptions,
    ) -> StrokeResult<()> {
        info!(
            "Fixing SVGs from {} into {}",
            source_dir.display(),
            dest_dir.display()
        );
        self.command
            .run(Self::arguments(source_dir, dest_dir, options))
            .await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_follow_options() {
        let mut options = SvgFixerOptions::default();
        let args = CommandSvgFixer::arguments(Path::new("/src"), Path::new("/dst"), &options);
        assert_eq!(args, vec!["-s", "/src", "-d", "/dst", "--show-progress"]);

        options.show_progress = false;
        options.throw_if_destination_does_not_exist = true;
        let args = CommandSvgFixer::arguments(Path::new("/src"), Path::new("/dst"), &options);
        assert_eq!(
            args,
            vec!["-s", "/src", "-d", "/dst", "--throw-if-destination-does-not-exist"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_configured_command() {
        let dir = tempfile::TempDir::new().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(src.join("a.svg"), "<svg/>").unwrap();

        // Stand-in that copies every file from -s to -d
        let script = r#"cp "$2"/*.svg "$4"/"#;
        let command = ToolCommand::from_argv(&[
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
            "fixer".to_string(),
        ])
        .unwrap();

        CommandSvgFixer::new(command)
            .fix(&src, &dst, &SvgFixerOptions::default())
            .await
            .unwrap();

        assert!(dst.join("a.svg").exists());
    }
}
