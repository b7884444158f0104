//! Integration tests for stroke2font

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn stroke2font(cwd: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("stroke2font");
        cmd.current_dir(cwd.path())
            .env_remove("STROKE2FONT_CONFIG")
            .env("CI", "1");
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Incremental icon font builder"))
            .stdout(predicate::str::contains("--fonts-url"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("stroke2font"));
    }

    #[test]
    fn no_arguments_prints_help() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn partial_flags_print_help() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .args(["--in", "icons", "--name", "glyphs"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn invalid_flag_value_exits_one() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .args(["--log-format", "xml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn unknown_flag_exits_one() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .arg("--no-such-flag")
            .assert()
            .code(1);
    }

    #[test]
    fn missing_input_dir_fails() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .args(["--in", "missing", "--out", "dist", "--name", "glyphs"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn missing_config_file_fails() {
        let dir = TempDir::new().unwrap();
        stroke2font(&dir)
            .args(["--config", "nope.toml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration file not found"));
    }

    #[test]
    fn config_without_name_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("stroke2font.toml"),
            "[icons]\ninput = \"icons\"\noutput = \"dist\"\n",
        )
        .unwrap();

        stroke2font(&dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Missing or invalid --name"));
    }

    #[test]
    fn missing_tool_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("icons")).unwrap();
        std::fs::write(dir.path().join("icons/a.svg"), "<svg/>").unwrap();
        std::fs::write(
            dir.path().join("stroke2font.toml"),
            r#"
[icons]
input = "icons"
output = "dist"

[font]
name = "glyphs"

[tools]
svg_fixer = ["stroke2font-test-no-such-tool"]
"#,
        )
        .unwrap();

        stroke2font(&dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Required tool not found"))
            .stderr(predicate::str::contains("Hint:"));
        assert!(!dir.path().join("dist/.manifest.json").exists());
    }

    #[cfg(unix)]
    mod end_to_end {
        use super::*;

        /// Copies `-s` into `-d`
        const FIXER: &str = r#"cp "$2"/*.svg "$4"/ && echo run >> "$4/../fixer.log""#;

        /// Writes fonts and a codepoint map for every cleaned icon
        const GENERATOR: &str = r#"
in="$0"; out="$2"; name="$4"
printf woff2 > "$out/$name.woff2"
printf woff > "$out/$name.woff"
cp_json="{"; n=61697; sep=""
for f in "$in"/*.svg; do
  [ -e "$f" ] || continue
  g=$(basename "$f" .svg)
  cp_json="$cp_json$sep\"$g\": $n"; sep=", "; n=$((n+1))
done
printf '%s}' "$cp_json" > "$out/$name.json"
echo run >> "$out/generator.log"
"#;

        fn project() -> TempDir {
            let dir = TempDir::new().unwrap();
            let icons = dir.path().join("icons");
            std::fs::create_dir_all(&icons).unwrap();
            std::fs::write(icons.join("arrow.svg"), "<svg>arrow</svg>").unwrap();
            std::fs::write(icons.join("24px_close.svg"), "<svg>close</svg>").unwrap();

            let config = format!(
                r#"
[icons]
input = "icons"
output = "dist"

[font]
name = "glyphs"
prefix = "ic"

[tools]
svg_fixer = ["sh", "-c", {fixer:?}, "fixer"]
font_generator = ["sh", "-c", {generator:?}]
timeout_secs = 30
"#,
                fixer = FIXER,
                generator = GENERATOR,
            );
            std::fs::write(dir.path().join("stroke2font.toml"), config).unwrap();
            dir
        }

        fn runs(path: std::path::PathBuf) -> usize {
            std::fs::read_to_string(path)
                .map(|s| s.lines().count())
                .unwrap_or(0)
        }

        #[test]
        fn builds_then_skips() {
            let dir = project();
            let dist = dir.path().join("dist");

            stroke2font(&dir)
                .assert()
                .success()
                .stdout(predicate::str::contains("Built 2 glyph(s)"));

            assert!(dist.join("glyphs.woff2").exists());
            assert!(dist.join(".manifest.json").exists());
            assert!(dist.join(".cleaned-svg/arrow.svg").exists());
            assert!(!dist.join("tmp-input").exists());
            let css = std::fs::read_to_string(dist.join("glyphs.css")).unwrap();
            assert!(css.contains(".ic-arrow:before"));
            assert!(css.contains(".ic-close:before"));

            stroke2font(&dir)
                .assert()
                .success()
                .stdout(predicate::str::contains("No SVG changes detected"));

            assert_eq!(runs(dist.join("fixer.log")), 1);
            assert_eq!(runs(dist.join("generator.log")), 1);
        }

        #[test]
        fn dry_run_writes_nothing() {
            let dir = project();

            stroke2font(&dir)
                .arg("--dry-run")
                .assert()
                .success()
                .stdout(predicate::str::contains("arrow.svg"))
                .stdout(predicate::str::contains("Would clean 2 icon(s)"));

            assert!(!dir.path().join("dist").exists());
        }

        #[test]
        fn deleted_icon_regenerates_without_recleaning() {
            let dir = project();
            let dist = dir.path().join("dist");
            stroke2font(&dir).assert().success();

            std::fs::remove_file(dir.path().join("icons/arrow.svg")).unwrap();
            stroke2font(&dir)
                .assert()
                .success()
                .stdout(predicate::str::contains("Built 1 glyph(s)"));

            assert!(!dist.join(".cleaned-svg/arrow.svg").exists());
            assert_eq!(runs(dist.join("fixer.log")), 1);
            assert_eq!(runs(dist.join("generator.log")), 2);
        }

        #[test]
        fn cli_flag_change_rebuilds() {
            let dir = project();
            let dist = dir.path().join("dist");
            stroke2font(&dir).assert().success();

            stroke2font(&dir)
                .args(["--prefix", "glyph"])
                .assert()
                .success()
                .stdout(predicate::str::contains("Cleaned 2 icon(s)"));

            let css = std::fs::read_to_string(dist.join("glyphs.css")).unwrap();
            assert!(css.contains(".glyph-arrow:before"));
            assert_eq!(runs(dist.join("fixer.log")), 2);
        }
    }
}
