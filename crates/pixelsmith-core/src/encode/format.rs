//! Output format selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format name not in the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported save format: {0:?}")]
pub struct UnknownFormat(pub String);

/// Formats an edited image can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaveFormat {
    #[default]
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl SaveFormat {
    /// Every supported format, in the order a format picker lists them.
    pub const ALL: [SaveFormat; 4] = [
        SaveFormat::Jpeg,
        SaveFormat::Png,
        SaveFormat::Bmp,
        SaveFormat::Tiff,
    ];

    /// Upper-case display name, e.g. "JPEG".
    pub fn name(self) -> &'static str {
        match self {
            SaveFormat::Jpeg => "JPEG",
            SaveFormat::Png => "PNG",
            SaveFormat::Bmp => "BMP",
            SaveFormat::Tiff => "TIFF",
        }
    }

    /// Default file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Jpeg => "jpeg",
            SaveFormat::Png => "png",
            SaveFormat::Bmp => "bmp",
            SaveFormat::Tiff => "tiff",
        }
    }

    /// Whether the encoder honours a quality setting.
    pub fn uses_quality(self) -> bool {
        matches!(self, SaveFormat::Jpeg)
    }
}

impl FromStr for SaveFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JPEG" | "JPG" => Ok(SaveFormat::Jpeg),
            "PNG" => Ok(SaveFormat::Png),
            "BMP" => Ok(SaveFormat::Bmp),
            "TIFF" | "TIF" => Ok(SaveFormat::Tiff),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
