//! Command line parsing and [`PuhuiConfig`] construction.

use std::{path::PathBuf, time::Duration};

use clap::{Arg, ArgAction, ArgMatches, Command, builder::EnumValueParser, value_parser};

use lvgl_font::converter::DEFAULT_TIMEOUT;

use crate::common::Preset;

/// Description of which Puhui fonts to generate and how to reach the tools that generate them.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PuhuiConfig {
    /// The TrueType font to convert, or [`None`] to search the default locations.
    pub font: Option<PathBuf>,
    /// The directory the generated sources and header are written to.
    pub output_dir: PathBuf,
    /// Whether to restrict every preset to the common Chinese ranges.
    pub common_only: bool,
    /// A single preset to generate instead of all of them.
    pub preset: Option<Preset>,
    /// The `lv_font_conv` executable.
    pub converter: PathBuf,
    /// The Node.js executable.
    pub node: PathBuf,
    /// The limit on a single `lv_font_conv` run.
    pub timeout: Duration,
}

/// Parses the process arguments into a [`PuhuiConfig`].
pub fn get_config() -> PuhuiConfig {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`PuhuiConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> PuhuiConfig {
    let font = matches.get_one::<PathBuf>("font").cloned();

    let output_dir = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| unreachable!("`output` should have a default value"));

    let common_only = matches.get_flag("common-only");

    let preset = matches.get_one::<Preset>("config").copied();

    let converter = matches
        .get_one::<PathBuf>("converter")
        .cloned()
        .unwrap_or_else(|| unreachable!("`converter` should have a default value"));

    let node = matches
        .get_one::<PathBuf>("node")
        .cloned()
        .unwrap_or_else(|| unreachable!("`node` should have a default value"));

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    PuhuiConfig {
        font,
        output_dir,
        common_only,
        preset,
        converter,
        node,
        timeout,
    }
}

/// Returns the command parser for `puhui-font`.
pub fn command_parser() -> Command {
    let font = Arg::new("font")
        .long("font")
        .help("Path to the Puhui TTF font file")
        .value_parser(value_parser!(PathBuf));

    let output = Arg::new("output")
        .long("output")
        .help("Output directory")
        .value_parser(value_parser!(PathBuf))
        .default_value("./generated_fonts");

    let common_only = Arg::new("common-only")
        .long("common-only")
        .help("Use only common Chinese characters")
        .action(ArgAction::SetTrue);

    let config = Arg::new("config")
        .long("config")
        .help("Generate a specific font config only")
        .value_parser(EnumValueParser::<Preset>::new());

    let converter = Arg::new("converter")
        .long("converter")
        .env("LV_FONT_CONV")
        .help("The lv_font_conv executable")
        .value_parser(value_parser!(PathBuf))
        .default_value("lv_font_conv");

    let node = Arg::new("node")
        .long("node")
        .env("NODE")
        .help("The Node.js executable")
        .value_parser(value_parser!(PathBuf))
        .default_value("node");

    let timeout = Arg::new("timeout")
        .long("timeout")
        .help(format!(
            "Seconds allowed for a single lv_font_conv run [default: {}]",
            DEFAULT_TIMEOUT.as_secs()
        ))
        .value_parser(value_parser!(u64).range(1..));

    Command::new("puhui-font")
        .about("Generate Puhui fonts for LVGL")
        .arg(font)
        .arg(output)
        .arg(common_only)
        .arg(config)
        .arg(converter)
        .arg(node)
        .arg(timeout)
}
