//! The human-readable report printed at the end of a run.

use std::{fs, path::Path};

use crate::{generate::Report, header::HeaderSpec};

/// Renders the end-of-run summary for `report`.
///
/// Sizes are read from the files in `output_dir`; files that disappeared are listed without one.
pub fn render_summary(report: &Report, output_dir: &Path, header: &HeaderSpec) -> String {
    let mut lines = vec![
        String::new(),
        "=".repeat(50),
        format!(
            "Generated {}/{} fonts successfully",
            report.produced.len(),
            report.attempted
        ),
    ];

    if let Some(example) = report.produced.first() {
        lines.push(String::new());
        lines.push(format!("Generated files in {}:", output_dir.display()));

        let files = report
            .produced
            .iter()
            .map(|config| config.output.as_str())
            .chain([header.file_name]);
        lines.extend(files.map(|file| match fs::metadata(output_dir.join(file)) {
            Ok(metadata) => format!("  - {file}: {}", format_size(metadata.len())),
            Err(_) => format!("  - {file}"),
        }));

        lines.push(String::new());
        lines.push("Usage in your ESP32 project:".to_owned());
        lines.push("1. Copy the generated .c and .h files to your project".to_owned());
        lines.push("2. Add the .c files to your CMakeLists.txt".to_owned());
        lines.push(format!("3. Include {}", header.file_name));
        lines.push(format!(
            "4. Use the fonts like: lv_style_set_text_font(&style, &{});",
            example.name
        ));
    }

    let mut summary = lines.join("\n");
    summary.push('\n');
    summary
}

/// Formats a byte count in kilobytes with one decimal place.
fn format_size(bytes: u64) -> String {
    #[expect(clippy::cast_precision_loss, reason = "sizes are approximate")]
    let kilobytes = bytes as f64 / 1024.0;

    format!("{kilobytes:.1} KB")
}
