//! Command line parsing and [`CommonConfig`] construction.

use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use clap::{
    Arg, ArgMatches, Command,
    builder::{EnumValueParser, RangedU64ValueParser},
    value_parser,
};
use lvgl_font::{charset::DEFAULT_BATCH_SIZE, config::Bpp, converter::DEFAULT_TIMEOUT};

/// Description of the common Chinese fonts to generate.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CommonConfig {
    /// The TrueType font to convert.
    pub font: PathBuf,
    /// The directory the generated sources and header are written to.
    pub output_dir: PathBuf,
    /// The unparsed comma separated list of pixel sizes.
    ///
    /// Parsed by the action so a malformed list is reported like the other precondition failures.
    pub sizes: String,
    /// Bits per pixel shared by every generated font.
    pub bpp: Bpp,
    /// The number of explicit code points per `-r` argument.
    pub batch_size: NonZeroUsize,
    /// The `lv_font_conv` executable.
    pub converter: PathBuf,
    /// The limit on a single `lv_font_conv` run.
    pub timeout: Duration,
}

/// Parses the process arguments into a [`CommonConfig`].
pub fn get_config() -> CommonConfig {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`CommonConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> CommonConfig {
    let font = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` is a required argument"));

    let output_dir = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| unreachable!("`output` should have a default value"));

    let sizes = matches
        .get_one::<String>("sizes")
        .cloned()
        .unwrap_or_else(|| unreachable!("`sizes` should have a default value"));

    let bpp = matches
        .get_one::<Bpp>("bpp")
        .copied()
        .unwrap_or_else(|| unreachable!("`bpp` should have a default value"));

    let batch_size = matches
        .get_one::<usize>("batch-size")
        .copied()
        .and_then(NonZeroUsize::new)
        .unwrap_or(DEFAULT_BATCH_SIZE);

    let converter = matches
        .get_one::<PathBuf>("converter")
        .cloned()
        .unwrap_or_else(|| unreachable!("`converter` should have a default value"));

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    CommonConfig {
        font,
        output_dir,
        sizes,
        bpp,
        batch_size,
        converter,
        timeout,
    }
}

/// Returns the command parser for `common-chinese-font`.
pub fn command_parser() -> Command {
    let font = Arg::new("font")
        .long("font")
        .help("Path to the Chinese TTF font file")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let output = Arg::new("output")
        .long("output")
        .help("Output directory")
        .value_parser(value_parser!(PathBuf))
        .default_value("./common_fonts");

    let sizes = Arg::new("sizes")
        .long("sizes")
        .help("Font sizes (comma-separated)")
        .default_value("14,16,18,20");

    let bpp = Arg::new("bpp")
        .long("bpp")
        .help("Bits per pixel")
        .value_parser(EnumValueParser::<Bpp>::new())
        .default_value("1");

    let batch_size = Arg::new("batch-size")
        .long("batch-size")
        .help(format!(
            "Code points per -r argument passed to lv_font_conv [default: {DEFAULT_BATCH_SIZE}]"
        ))
        .value_parser(RangedU64ValueParser::<usize>::new().range(1..));

    let converter = Arg::new("converter")
        .long("converter")
        .env("LV_FONT_CONV")
        .help("The lv_font_conv executable")
        .value_parser(value_parser!(PathBuf))
        .default_value("lv_font_conv");

    let timeout = Arg::new("timeout")
        .long("timeout")
        .help(format!(
            "Seconds allowed for a single lv_font_conv run [default: {}]",
            DEFAULT_TIMEOUT.as_secs()
        ))
        .value_parser(value_parser!(u64).range(1..));

    Command::new("common-chinese-font")
        .about("Generate common Chinese fonts for LVGL")
        .arg(font)
        .arg(output)
        .arg(sizes)
        .arg(bpp)
        .arg(batch_size)
        .arg(converter)
        .arg(timeout)
}
