//! The fixed set of Puhui font presets.

use lvgl_font::config::{Bpp, FontConfig};

/// A predefined Puhui font configuration.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Preset {
    /// 14 pixels, 1 bit per pixel.
    Puhui14,
    /// 16 pixels, 1 bit per pixel.
    Puhui16,
    /// 18 pixels, 1 bit per pixel.
    Puhui18,
    /// 20 pixels, 1 bit per pixel.
    Puhui20,
}

impl Preset {
    /// Every preset, in generation order.
    pub const ALL: &[Preset] = &[Self::Puhui14, Self::Puhui16, Self::Puhui18, Self::Puhui20];

    /// Returns the textual representation of the [`Preset`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Puhui14 => "puhui_14_1",
            Self::Puhui16 => "puhui_16_1",
            Self::Puhui18 => "puhui_18_1",
            Self::Puhui20 => "puhui_20_1",
        }
    }

    /// Returns the [`FontConfig`] the preset describes.
    pub fn font_config(&self) -> FontConfig {
        let size = match self {
            Self::Puhui14 => 14,
            Self::Puhui16 => 16,
            Self::Puhui18 => 18,
            Self::Puhui20 => 20,
        };

        FontConfig::new(size, Bpp::One, format!("font_{}", self.as_str()))
    }
}

impl clap::ValueEnum for Preset {
    fn value_variants<'a>() -> &'a [Self] {
        Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
