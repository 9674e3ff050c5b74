//! Exit status and filesystem effects of the `puhui-font` binary.
#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

/// Answers `--help`, logs every invocation, fails for size 14 and otherwise writes a minimal LVGL
/// font source to `--output`.
const FAKE_CONVERTER: &str = r#"#!/bin/sh
echo "$*" >> "$0.log"
[ "$1" = "--help" ] && exit 0
out=""
size=""
while [ $# -gt 0 ]; do
    case "$1" in
        --output) out="$2"; shift 2 ;;
        --size) size="$2"; shift 2 ;;
        *) shift ;;
    esac
done
if [ "$size" = "14" ]; then
    echo "glyph rasterization failed" >&2
    exit 1
fi
cat > "$out" <<'EOF'
const lv_font_t PuHuiTi_Regular = {
    .line_height = 16,
};
EOF
"#;

const FAKE_NODE: &str = "#!/bin/sh\necho v20.11.0\n";

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
        install(&fixture.converter(), FAKE_CONVERTER);
        install(&fixture.node(), FAKE_NODE);
        fs::write(fixture.font(), b"ttf").unwrap();
        fixture
    }

    fn converter(&self) -> PathBuf {
        self.tools.path().join("lv_font_conv")
    }

    fn node(&self) -> PathBuf {
        self.tools.path().join("node")
    }

    fn font(&self) -> PathBuf {
        self.work.path().join("puhui.ttf")
    }

    fn out(&self) -> PathBuf {
        self.work.path().join("out")
    }

    fn converter_log(&self) -> String {
        fs::read_to_string(self.tools.path().join("lv_font_conv.log")).unwrap_or_default()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_puhui-font"))
            .current_dir(self.work.path())
            .env("LV_FONT_CONV", self.converter())
            .env("NODE", self.node())
            .env_remove("RUST_LOG")
            .arg("--output")
            .arg(self.out())
            .args(args)
            .output()
            .unwrap()
    }
}

fn install(path: &Path, script: &str) {
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn missing_converter() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.converter()).unwrap();

    let output = fixture.run(&["--font", fixture.font().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("npm i lv_font_conv -g"));
    assert!(!fixture.out().exists());
}

#[test]
fn missing_node() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--node", "/nonexistent/node"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Node.js"));
    assert!(!fixture.out().exists());
    assert!(fixture.converter_log().is_empty());
}

#[test]
fn missing_font() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", "/nonexistent/puhui.ttf"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/puhui.ttf"));
    assert!(!fixture.out().exists());
    // Only the availability probe ran.
    assert_eq!(fixture.converter_log(), "--help\n");
}

#[test]
fn default_font_location() {
    let fixture = Fixture::new();
    fs::create_dir(fixture.work.path().join("fonts")).unwrap();
    fs::rename(
        fixture.font(),
        fixture.work.path().join("fonts/PuHuiTi-Regular.ttf"),
    )
    .unwrap();

    let output = fixture.run(&["--config", "puhui_16_1"]);

    assert!(output.status.success());
    assert!(
        fixture
            .converter_log()
            .contains("--font ./fonts/PuHuiTi-Regular.ttf")
    );
}

#[test]
fn single_preset() {
    let fixture = Fixture::new();

    let output = fixture.run(&[
        "--font",
        fixture.font().to_str().unwrap(),
        "--config",
        "puhui_18_1",
    ]);
    assert!(output.status.success());

    let source = fs::read_to_string(fixture.out().join("font_puhui_18_1.c")).unwrap();
    assert!(source.starts_with("#include \"lvgl.h\"\n\nLV_FONT_DECLARE(font_puhui_18_1);\n\n"));
    assert!(source.contains("const lv_font_t font_puhui_18_1 = {"));

    // Sizes above 16 get the full CJK blocks.
    assert!(fixture.converter_log().contains("-r 0x4E00-0x9FFF"));

    let header = fs::read_to_string(fixture.out().join("font_puhui.h")).unwrap();
    assert!(header.contains("#ifndef FONT_PUHUI_H"));
    assert!(header.contains("LV_FONT_DECLARE(font_puhui_18_1);"));
    assert!(!header.contains("font_puhui_16_1"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 1/1 fonts successfully"));
}

#[test]
fn partial_failure_exits_nonzero() {
    let fixture = Fixture::new();

    let output = fixture.run(&["--font", fixture.font().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    assert!(!fixture.out().join("font_puhui_14_1.c").exists());
    let header = fs::read_to_string(fixture.out().join("font_puhui.h")).unwrap();
    assert!(!header.contains("font_puhui_14_1"));
    for name in ["font_puhui_16_1", "font_puhui_18_1", "font_puhui_20_1"] {
        assert!(fixture.out().join(format!("{name}.c")).exists());
        assert!(header.contains(&format!("LV_FONT_DECLARE({name});")));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 3/4 fonts successfully"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("glyph rasterization failed"));
}

#[test]
fn common_only_uses_reduced_ranges() {
    let fixture = Fixture::new();

    let output = fixture.run(&[
        "--font",
        fixture.font().to_str().unwrap(),
        "--config",
        "puhui_20_1",
        "--common-only",
    ]);

    assert!(output.status.success());
    let log = fixture.converter_log();
    assert!(log.contains("-r 0x4E00-0x5FFF"));
    assert!(!log.contains("0x9FFF"));
}
