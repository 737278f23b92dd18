//! Text encodings of source files and CSV outputs
//!
//! Catalog exports often come in windows-1251, so sources are decoded and
//! reports encoded with the same encoding. JSON artifacts stay UTF-8.

use anyhow::{bail, Result};
use dedupx_core::Error;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Windows1251,
}

impl TextEncoding {
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Windows1251 => WINDOWS_1251,
        }
    }

    /// Decode bytes, dropping a UTF-8 BOM. Malformed input is an error.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let (text, malformed) = self.encoding().decode_with_bom_removal(bytes);
        if malformed {
            bail!("input is not valid {}", self);
        }
        Ok(text.into_owned())
    }

    /// Encode text; unmappable characters are written as numeric references
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let (bytes, _, unmappable) = self.encoding().encode(text);
        if unmappable {
            tracing::warn!(encoding = %self, "some characters have no mapping and were escaped");
        }
        bytes.into_owned()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoding().name().to_lowercase())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Encoding::for_label(s.trim().as_bytes()) {
            Some(encoding) if encoding == UTF_8 => Ok(TextEncoding::Utf8),
            Some(encoding) if encoding == WINDOWS_1251 => Ok(TextEncoding::Windows1251),
            _ => Err(Error::InvalidConfig(format!(
                "unsupported encoding '{}', expected utf-8 or windows-1251",
                s
            ))),
        }
    }
}
