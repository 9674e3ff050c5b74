//! Shared machinery for generating LVGL bitmap font sources with `lv_font_conv`.
//!
//! The pipeline is linear: check that the converter is reachable, resolve the source TrueType
//! font, assemble the character ranges, invoke the converter once per [`FontConfig`][fc], rename
//! the symbol in each generated file, and finally emit a header declaring every produced font.
//!
//! [fc]: config::FontConfig

pub mod charset;
pub mod config;
pub mod converter;
pub mod dependency;
pub mod generate;
pub mod header;
pub mod locate;
pub mod postprocess;
pub mod summary;
