//! Generation of the Puhui fonts given a [`PuhuiConfig`].

use std::fs;

use anyhow::{Context, Result};
use lvgl_font::{
    charset::{COMMON_CHINESE_RANGES, FULL_CHINESE_RANGES, range_arguments},
    converter::Converter,
    dependency::{self, Dependency},
    generate::{Plan, Report, generate_all},
    header::{HeaderSpec, write_header},
    locate::locate_font,
    postprocess::DeclarationStyle,
    summary::render_summary,
};

use crate::{cli::PuhuiConfig, common::Preset};

/// Locations searched for the Puhui font when `--font` is not given.
pub const FONT_CANDIDATES: &[&str] = &[
    "./PuHuiTi-Regular.ttf",
    "./puhui.ttf",
    "./fonts/PuHuiTi-Regular.ttf",
    "./fonts/puhui.ttf",
    "../fonts/PuHuiTi-Regular.ttf",
    "../fonts/puhui.ttf",
    "C:/Windows/Fonts/PuHuiTi-Regular.ttf",
];

/// The header declaring every generated Puhui font.
pub const HEADER: HeaderSpec = HeaderSpec {
    file_name: "font_puhui.h",
    guard: "FONT_PUHUI_H",
    comment: "Puhui font declarations",
};

/// Sizes at or below this use the reduced ranges even without `--common-only`.
const COMMON_RANGES_MAX_SIZE: u32 = 16;

/// Generates the Puhui fonts requested by `config`, returning the [`Report`] of the run.
///
/// # Errors
///
/// Returns errors when Node.js or `lv_font_conv` is unavailable, when no font file is found, or
/// when the output directory or header cannot be written. Failures of individual presets are
/// recorded in the [`Report`] instead.
pub fn generate(config: PuhuiConfig) -> Result<Report> {
    dependency::check_all(&[
        Dependency::node(&config.node),
        Dependency::lv_font_conv(&config.converter),
    ])?;

    let font_path = locate_font(config.font.as_deref(), FONT_CANDIDATES).context(
        "Puhui font file not found. Please provide its path using --font, \
         or place it at ./PuHuiTi-Regular.ttf or ./fonts/PuHuiTi-Regular.ttf",
    )?;

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "creating output directory {}",
            config.output_dir.display()
        )
    })?;
    log::info!("Output directory: {}", config.output_dir.display());

    let presets = match config.preset {
        Some(preset) => vec![preset],
        None => Preset::ALL.to_vec(),
    };
    let plans = presets
        .iter()
        .map(|preset| plan(*preset, config.common_only))
        .collect::<Vec<_>>();

    let converter = Converter::new(config.converter).with_timeout(config.timeout);
    let report = generate_all(
        &converter,
        &font_path,
        &config.output_dir,
        &plans,
        DeclarationStyle::IncludeAndDeclare,
    );

    if !report.produced.is_empty() {
        write_header(&config.output_dir, &HEADER, &report.names())
            .context("writing font header")?;
    }

    print!("{}", render_summary(&report, &config.output_dir, &HEADER));

    Ok(report)
}

/// Chooses the character ranges and flags for `preset`.
fn plan(preset: Preset, common_only: bool) -> Plan {
    let config = preset.font_config();

    let ranges = if common_only || config.size <= COMMON_RANGES_MAX_SIZE {
        COMMON_CHINESE_RANGES
    } else {
        FULL_CHINESE_RANGES
    };
    let no_compress = config.bpp.bits() > 1;

    Plan {
        config,
        ranges: range_arguments(ranges),
        no_compress,
    }
}
