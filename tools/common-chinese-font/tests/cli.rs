//! Exit status and filesystem effects of the `common-chinese-font` binary.
#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::PathBuf,
    process::{Command, Output},
};

use tempfile::TempDir;

/// Answers `--help`, records each conversion's arguments one per line, fails for size 18 and
/// otherwise writes a minimal LVGL font source to `--output`.
const FAKE_CONVERTER: &str = r#"#!/bin/sh
[ "$1" = "--help" ] && exit 0
printf '%s\n' "$@" >> "$0.log"
out=""
size=""
while [ $# -gt 0 ]; do
    case "$1" in
        --output) out="$2"; shift 2 ;;
        --size) size="$2"; shift 2 ;;
        *) shift ;;
    esac
done
if [ "$size" = "18" ]; then
    echo "unsupported size" >&2
    exit 2
fi
cat > "$out" <<'EOF'
static const uint8_t glyph_bitmap[] = {0x00};
const lv_font_t SimSun = {
    .line_height = 16,
};
EOF
"#;

struct Fixture {
    tools: TempDir,
    work: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            tools: tempfile::tempdir().unwrap(),
            work: tempfile::tempdir().unwrap(),
        };

        let converter = fixture.converter();
        fs::write(&converter, FAKE_CONVERTER).unwrap();
        fs::set_permissions(&converter, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(fixture.font(), b"ttf").unwrap();

        fixture
    }

    fn converter(&self) -> PathBuf {
        self.tools.path().join("lv_font_conv")
    }

    fn font(&self) -> PathBuf {
        self.work.path().join("simsun.ttf")
    }

    fn out(&self) -> PathBuf {
        self.work.path().join("out")
    }

    fn conversions(&self) -> Vec<String> {
        fs::read_to_string(self.tools.path().join("lv_font_conv.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_common-chinese-font"))
            .current_dir(self.work.path())
            .env("LV_FONT_CONV", self.converter())
            .env_remove("RUST_LOG")
            .arg("--output")
            .arg(self.out())
            .args(args)
            .output()
            .unwrap()
    }
}

#[test]
fn missing_converter() {
    let fixture = Fixture::new();

    let output = fixture.run(&[
        "--font",
        fixture.font().to_str().unwrap(),
        "--converter",
        "/nonexistent/lv_font_conv",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("npm i lv_font_conv -g"));
    assert!(!fixture.out().exists());
}

#[test]
fn missing_font() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", "/nonexistent/simsun.ttf"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("font file not found"));
    assert!(fixture.conversions().is_empty());
    assert!(!fixture.out().exists());
}

#[test]
fn malformed_sizes() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", fixture.font().to_str().unwrap(), "--sizes", "14,x"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid font size \"x\""));
    assert!(fixture.conversions().is_empty());
    assert!(!fixture.out().exists());
}

#[test]
fn repeated_size_is_generated_once() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", fixture.font().to_str().unwrap(), "--sizes", "16,16"]);
    assert!(output.status.success());

    let conversions = fixture.conversions();
    assert_eq!(conversions.iter().filter(|arg| *arg == "--font").count(), 1);

    let header = fs::read_to_string(fixture.out().join("common_chinese_fonts.h")).unwrap();
    assert_eq!(header.matches("LV_FONT_DECLARE(font_chinese_common_16_1);").count(), 1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 1/1 fonts successfully"));
}

#[test]
fn single_size() {
    let fixture = Fixture::new();

    let output = fixture.run(&[
        "--font",
        fixture.font().to_str().unwrap(),
        "--sizes",
        "16",
        "--bpp",
        "2",
    ]);
    assert!(output.status.success());

    let source = fs::read_to_string(fixture.out().join("font_chinese_common_16_2.c")).unwrap();
    assert!(source.starts_with("#include \"lvgl.h\"\n\nstatic const uint8_t"));
    assert!(source.contains("\nconst lv_font_t font_chinese_common_16_2 = {\n"));
    assert!(!source.contains("LV_FONT_DECLARE"));

    let header = fs::read_to_string(fixture.out().join("common_chinese_fonts.h")).unwrap();
    assert!(header.contains("#define COMMON_CHINESE_FONTS_H"));
    assert!(header.contains("LV_FONT_DECLARE(font_chinese_common_16_2);"));

    let args = fixture.conversions();
    let bpp = args.iter().position(|arg| arg == "--bpp").unwrap();
    assert_eq!(args[bpp + 1], "2");

    let ranges = args
        .iter()
        .zip(args.iter().skip(1))
        .filter(|(flag, _)| *flag == "-r")
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ranges[..2], ["0x20-0x7F", "0x3000-0x303F"]);
    assert!(ranges.len() > 2);
    assert!(ranges[2].starts_with("0x7684,0x4E00,"));
    assert!(ranges[2..].iter().all(|batch| batch.split(',').count() <= 100));
}

#[test]
fn failed_size_is_skipped() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", fixture.font().to_str().unwrap(), "--sizes", "16,18"]);

    // Partial failure is reported but does not change the exit status.
    assert!(output.status.success());
    assert!(!fixture.out().join("font_chinese_common_18_1.c").exists());

    let header = fs::read_to_string(fixture.out().join("common_chinese_fonts.h")).unwrap();
    assert!(header.contains("LV_FONT_DECLARE(font_chinese_common_16_1);"));
    assert!(!header.contains("font_chinese_common_18_1"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 1/2 fonts successfully"));
    assert!(stdout.contains("font_chinese_common_16_1.c: "));
}

#[test]
fn every_size_fails() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", fixture.font().to_str().unwrap(), "--sizes", "18"]);

    assert!(output.status.success());
    assert!(!fixture.out().join("common_chinese_fonts.h").exists());
}
