//! The per-configuration conversion loop.

use std::path::{Path, PathBuf};

use crate::{
    config::FontConfig,
    converter::{ConversionJob, Converter, RunCommandError},
    postprocess::{DeclarationStyle, postprocess_file},
};

/// A [`FontConfig`] together with the converter arguments chosen for it.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Plan {
    /// The font to produce.
    pub config: FontConfig,
    /// The `-r` argument values.
    pub ranges: Vec<String>,
    /// Whether to pass `--no-compress`.
    pub no_compress: bool,
}

/// The outcome of [`generate_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The number of configurations attempted.
    pub attempted: usize,
    /// The configurations whose source was generated, in attempt order.
    pub produced: Vec<FontConfig>,
}

impl Report {
    /// Returns the number of configurations that failed to generate.
    pub fn failed(&self) -> usize {
        self.attempted - self.produced.len()
    }

    /// Returns `true` if every attempted configuration was generated.
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Returns the symbol names of the produced fonts.
    pub fn names(&self) -> Vec<&str> {
        self.produced
            .iter()
            .map(|config| config.name.as_str())
            .collect()
    }
}

/// Runs `converter` once per plan, sequentially, post-processing each generated source.
///
/// A failed conversion is logged and skipped. A failed post-processing step is logged as a warning
/// and the configuration still counts as produced, since its source exists on disk.
pub fn generate_all(
    converter: &Converter,
    font_path: &Path,
    output_dir: &Path,
    plans: &[Plan],
    style: DeclarationStyle,
) -> Report {
    let mut report = Report::default();

    for plan in plans {
        report.attempted += 1;
        if generate_one(converter, font_path, output_dir, plan, style).is_some() {
            report.produced.push(plan.config.clone());
        }
    }

    report
}

/// Generates and post-processes a single plan, returning the path of the generated source.
pub fn generate_one(
    converter: &Converter,
    font_path: &Path,
    output_dir: &Path,
    plan: &Plan,
    style: DeclarationStyle,
) -> Option<PathBuf> {
    let config = &plan.config;
    log::info!(
        "Generating {} (size: {}, bpp: {}, {} range arguments)...",
        config.name,
        config.size,
        config.bpp,
        plan.ranges.len()
    );

    let output_path = output_dir.join(&config.output);
    let job = ConversionJob {
        font_path: font_path.to_path_buf(),
        size: config.size,
        bpp: config.bpp,
        output_path: output_path.clone(),
        ranges: plan.ranges.clone(),
        no_compress: plan.no_compress,
    };

    if let Err(error) = converter.convert(&job) {
        log::error!("Error generating {}: {error}", config.output);
        if let RunCommandError::CommandFailed { stdout, .. } = &error {
            if !stdout.trim().is_empty() {
                log::error!("stdout: {}", stdout.trim());
            }
        }
        return None;
    }
    log::info!("Successfully generated {}", config.output);

    match postprocess_file(&output_path, &config.name, style) {
        Ok(0) => log::warn!(
            "No font declaration found in {}; symbol left unchanged",
            config.output
        ),
        Ok(_) => log::info!("Fixed font name to {}", config.name),
        Err(error) => log::warn!("Could not fix font name: {error:#}"),
    }

    Some(output_path)
}
