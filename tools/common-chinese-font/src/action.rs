//! Generation of the common Chinese fonts given a [`CommonConfig`].

use std::{fs, num::NonZeroUsize};

use anyhow::{Context, Result};
use lvgl_font::{
    charset::{self, BASIC_RANGES, COMMON_CHINESE_CHARS},
    config::{Bpp, FontConfig, parse_sizes},
    converter::Converter,
    dependency::{self, Dependency},
    generate::{Plan, Report, generate_all},
    header::{HeaderSpec, write_header},
    locate::locate_font,
    postprocess::DeclarationStyle,
    summary::render_summary,
};

use crate::cli::CommonConfig;

/// The header declaring every generated common Chinese font.
pub const HEADER: HeaderSpec = HeaderSpec {
    file_name: "common_chinese_fonts.h",
    guard: "COMMON_CHINESE_FONTS_H",
    comment: "Common Chinese font declarations",
};

/// Generates one common Chinese font per requested size, returning the [`Report`] of the run.
///
/// # Errors
///
/// Returns errors when `lv_font_conv` is unavailable, the font file does not exist, the size list
/// is malformed, or the output directory or header cannot be written. Failures of individual sizes
/// are recorded in the [`Report`] instead.
pub fn generate(config: CommonConfig) -> Result<Report> {
    dependency::check_all(&[Dependency::lv_font_conv(&config.converter)])?;

    let font_path = locate_font(Some(config.font.as_path()), &[])?;

    let sizes = parse_sizes(&config.sizes)?;

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "creating output directory {}",
            config.output_dir.display()
        )
    })?;
    log::info!("Output directory: {}", config.output_dir.display());

    let ranges = ranges(config.batch_size);
    log::info!(
        "Using {} common Chinese characters + ASCII + punctuation in {} range arguments",
        charset::code_points(COMMON_CHINESE_CHARS).len(),
        ranges.len()
    );

    let plans = sizes
        .iter()
        .map(|&size| Plan {
            config: font_config(size, config.bpp),
            ranges: ranges.clone(),
            no_compress: false,
        })
        .collect::<Vec<_>>();

    let converter = Converter::new(config.converter).with_timeout(config.timeout);
    let report = generate_all(
        &converter,
        &font_path,
        &config.output_dir,
        &plans,
        DeclarationStyle::IncludeOnly,
    );

    if !report.produced.is_empty() {
        write_header(&config.output_dir, &HEADER, &report.names())
            .context("writing font header")?;
    }

    print!("{}", render_summary(&report, &config.output_dir, &HEADER));

    Ok(report)
}

/// Returns the [`FontConfig`] for a common Chinese font of the given size and depth.
pub fn font_config(size: u32, bpp: Bpp) -> FontConfig {
    FontConfig::new(size, bpp, format!("font_chinese_common_{size}_{bpp}"))
}

/// Returns the basic ranges followed by the common characters in batches of `batch_size`.
fn ranges(batch_size: NonZeroUsize) -> Vec<String> {
    let points = charset::code_points(COMMON_CHINESE_CHARS);

    let mut ranges = charset::range_arguments(BASIC_RANGES);
    ranges.extend(charset::batch_arguments(&points, batch_size));
    ranges
}
