//! Generates Puhui bitmap fonts for LVGL with `lv_font_conv`.
//!
//! Four presets from 14 to 20 pixels are produced. Each is renamed to `font_puhui_<size>_1`, and
//! a `font_puhui.h` header declaring every generated font is written next to them.

use anyhow::Result;

pub mod action;
pub mod cli;
pub mod common;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = cli::get_config();
    let report = action::generate(config)?;

    if !report.all_succeeded() {
        anyhow::bail!(
            "{} of {} font configurations failed to generate",
            report.failed(),
            report.attempted
        );
    }

    Ok(())
}
