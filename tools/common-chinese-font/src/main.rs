//! Generates LVGL bitmap fonts restricted to the most commonly used Chinese characters.
//!
//! Only ASCII, CJK punctuation, and a fixed table of frequent ideographs are rasterized, which
//! keeps the generated sources small enough for embedded targets.

use anyhow::Result;

pub mod action;
pub mod cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = cli::get_config();
    let report = action::generate(config)?;

    if !report.all_succeeded() {
        log::warn!(
            "{} of {} font sizes failed to generate",
            report.failed(),
            report.attempted
        );
    }

    Ok(())
}
