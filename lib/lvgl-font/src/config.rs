//! Descriptions of a single font to generate.

use std::{collections::BTreeSet, error, fmt};

/// Bitmap color depth requested for the generated glyph rasters.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bpp {
    /// One bit per pixel.
    One,
    /// Two bits per pixel.
    Two,
    /// Four bits per pixel.
    Four,
    /// Eight bits per pixel.
    Eight,
}

impl Bpp {
    /// Returns the number of bits per pixel.
    pub fn bits(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Returns the textual representation of the [`Bpp`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Four => "4",
            Self::Eight => "8",
        }
    }
}

impl fmt::Display for Bpp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl clap::ValueEnum for Bpp {
    fn value_variants<'a>() -> &'a [Self] {
        static DEPTHS: &[Bpp] = &[Bpp::One, Bpp::Two, Bpp::Four, Bpp::Eight];

        DEPTHS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// A single font the converter should produce.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontConfig {
    /// Pixel size of the font.
    pub size: u32,
    /// Bits per pixel of the glyph bitmaps.
    pub bpp: Bpp,
    /// The C symbol the generated `lv_font_t` is given.
    pub name: String,
    /// The file name of the generated source, relative to the output directory.
    pub output: String,
}

impl FontConfig {
    /// Creates a [`FontConfig`] whose output file is `<name>.c`.
    pub fn new(size: u32, bpp: Bpp, name: impl Into<String>) -> Self {
        let name = name.into();
        let output = format!("{name}.c");

        Self {
            size,
            bpp,
            name,
            output,
        }
    }
}

/// Parses a comma separated list of pixel sizes such as `14,16,18`.
///
/// Repeated sizes are dropped, keeping the order of first occurrence.
///
/// # Errors
///
/// Returns [`ParseSizesError`] if an entry is not a positive integer. An empty list is rejected
/// because its single entry is empty.
pub fn parse_sizes(list: &str) -> Result<Vec<u32>, ParseSizesError> {
    let mut seen = BTreeSet::new();
    let mut sizes = Vec::new();

    for entry in list.split(',').map(str::trim) {
        let size = match entry.parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => {
                return Err(ParseSizesError {
                    entry: entry.to_owned(),
                });
            }
        };

        if seen.insert(size) {
            sizes.push(size);
        }
    }

    Ok(sizes)
}

/// An entry of a size list was not a positive integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSizesError {
    /// The offending entry, with surrounding whitespace removed.
    pub entry: String,
}

impl fmt::Display for ParseSizesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid font size {:?}: use comma-separated integers like '14,16,18'",
            self.entry
        )
    }
}

impl error::Error for ParseSizesError {}
