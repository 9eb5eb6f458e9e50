//! Font container conversion for web delivery.
//!
//! HarfBuzz subsets raw SFNT (TrueType/OpenType) data only. This crate unwraps
//! WOFF and WOFF2 inputs to SFNT and wraps subset output back into the
//! container the page embeds.
//!
//! # Example
//!
//! ```no_run
//! use fonttrim_font_woff2::{FontFormat, encode, to_sfnt};
//!
//! let woff2_data: &[u8] = &[];
//! let sfnt = to_sfnt(woff2_data).unwrap();
//! let rewrapped = encode(&sfnt, FontFormat::Woff2).unwrap();
//! ```

mod decode;
mod sfnt;
mod woff;
mod woff2;

use std::{fmt, path::Path, str::FromStr};

use anyhow::{Error, Result, bail};

pub use decode::to_sfnt;
pub use woff::encode_woff;
pub use woff2::encode_woff2;

/// Container format of a font file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFormat {
    /// Plain TrueType or OpenType data.
    Sfnt,
    /// WOFF 1.0, zlib-compressed tables.
    Woff,
    /// WOFF 2.0, one brotli stream for all tables.
    #[default]
    Woff2,
}

impl FontFormat {
    pub const ALL: [FontFormat; 3] = [FontFormat::Sfnt, FontFormat::Woff, FontFormat::Woff2];

    /// Detects the container from the leading signature bytes.
    ///
    /// Font collections (`ttcf`) are not supported and yield `None`.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data.get(..4)? {
            b"\x00\x01\x00\x00" | b"OTTO" | b"true" | b"typ1" => Some(Self::Sfnt),
            b"wOFF" => Some(Self::Woff),
            b"wOF2" => Some(Self::Woff2),
            _ => None,
        }
    }

    /// Infers the container from a file extension (`.woff2`, `.woff`, `.ttf`, `.otf`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "woff2" => Some(Self::Woff2),
            "woff" => Some(Self::Woff),
            "ttf" | "otf" => Some(Self::Sfnt),
            _ => None,
        }
    }

    /// Media type used for this container in CSS data URIs.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Sfnt => "application/font-sfnt",
            Self::Woff => "application/font-woff",
            Self::Woff2 => "application/font-woff2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sfnt => "sfnt",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sfnt" | "ttf" | "otf" | "truetype" | "opentype" => Ok(Self::Sfnt),
            "woff" => Ok(Self::Woff),
            "woff2" => Ok(Self::Woff2),
            _ => bail!("Unknown font format: {s} (expected sfnt, woff or woff2)"),
        }
    }
}

/// Wraps SFNT data into the requested container.
pub fn encode(sfnt: &[u8], format: FontFormat) -> Result<Vec<u8>> {
    match format {
        FontFormat::Sfnt => Ok(sfnt.to_vec()),
        FontFormat::Woff => encode_woff(sfnt),
        FontFormat::Woff2 => encode_woff2(sfnt),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use write_fonts::{FontBuilder, types::Tag};

    use super::*;

    /// Builds an SFNT with opaque tables of uneven lengths, including an
    /// unregistered tag.
    pub(crate) fn sample_sfnt() -> Vec<u8> {
        let mut builder = FontBuilder::new();
        builder.add_raw(Tag::new(b"cmap"), vec![0, 0, 0, 1, 0, 3, 0, 1, 0, 0, 0, 12]);
        builder.add_raw(Tag::new(b"name"), b"fonttrim".to_vec());
        builder.add_raw(Tag::new(b"post"), vec![0, 3, 0, 0, 0, 0, 0]);
        builder.add_raw(Tag::new(b"Zzzz"), vec![0xAB; 301]);
        builder.build()
    }

    #[test]
    fn test_sniff_signatures() {
        assert_eq!(FontFormat::sniff(&[0, 1, 0, 0, 0]), Some(FontFormat::Sfnt));
        assert_eq!(FontFormat::sniff(b"OTTO...."), Some(FontFormat::Sfnt));
        assert_eq!(FontFormat::sniff(b"wOFF...."), Some(FontFormat::Woff));
        assert_eq!(FontFormat::sniff(b"wOF2...."), Some(FontFormat::Woff2));
        assert_eq!(FontFormat::sniff(b"ttcf...."), None);
        assert_eq!(FontFormat::sniff(b"wO"), None);
    }

    #[test]
    fn test_sniff_built_font() {
        assert_eq!(FontFormat::sniff(&sample_sfnt()), Some(FontFormat::Sfnt));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(FontFormat::from_path(Path::new("out/F-subset.woff2")), Some(FontFormat::Woff2));
        assert_eq!(FontFormat::from_path(Path::new("F.WOFF")), Some(FontFormat::Woff));
        assert_eq!(FontFormat::from_path(Path::new("F.otf")), Some(FontFormat::Sfnt));
        assert_eq!(FontFormat::from_path(Path::new("F.bin")), None);
        assert_eq!(FontFormat::from_path(Path::new("F")), None);
    }

    #[test]
    fn test_parse_and_display() {
        for format in FontFormat::ALL {
            assert_eq!(format.to_string().parse::<FontFormat>().unwrap(), format);
        }
        assert_eq!("TrueType".parse::<FontFormat>().unwrap(), FontFormat::Sfnt);
        assert!("eot".parse::<FontFormat>().is_err());
    }

    #[test]
    fn test_media_types() {
        assert_eq!(FontFormat::default().media_type(), "application/font-woff2");
        assert_eq!(FontFormat::Woff.media_type(), "application/font-woff");
    }

    #[test]
    fn test_encode_sfnt_is_passthrough() {
        let sfnt = sample_sfnt();
        assert_eq!(encode(&sfnt, FontFormat::Sfnt).unwrap(), sfnt);
    }
}
