//! Text encodings understood by line sources and the field splitter.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// The text encoding of a CSV source.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Hash, PartialEq, Serialize,
)]
pub enum Encoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    #[strum(to_string = "utf-8", serialize = "utf8", serialize = "UTF-8")]
    Utf8,
    #[serde(rename = "ascii", alias = "us-ascii")]
    #[strum(to_string = "ascii", serialize = "us-ascii", serialize = "ASCII")]
    Ascii,
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    #[serde(rename = "latin1", alias = "iso-8859-1")]
    #[strum(to_string = "latin1", serialize = "iso-8859-1", serialize = "ISO-8859-1")]
    Latin1,
    #[serde(rename = "utf-16le")]
    #[strum(to_string = "utf-16le", serialize = "UTF-16LE")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    #[strum(to_string = "utf-16be", serialize = "UTF-16BE")]
    Utf16Be,
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf8
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EncodingError {
    #[error("{ch:?} cannot be represented in {encoding}")]
    Unrepresentable { ch: char, encoding: Encoding },
    #[error("invalid {0} byte sequence")]
    Malformed(Encoding),
}

impl Encoding {
    /// Returns the number of bytes in one code unit.
    ///
    /// Encoded separators and terminators only match at offsets that are a
    /// multiple of this width.
    #[must_use]
    pub fn unit_width(self) -> usize {
        match self {
            Self::Utf8 | Self::Ascii | Self::Latin1 => 1,
            Self::Utf16Le | Self::Utf16Be => 2,
        }
    }

    /// Returns the encoded form of `\n`.
    #[must_use]
    pub fn newline(self) -> Vec<u8> {
        match self {
            Self::Utf8 | Self::Ascii | Self::Latin1 => vec![b'\n'],
            Self::Utf16Le => vec![b'\n', 0],
            Self::Utf16Be => vec![0, b'\n'],
        }
    }

    /// Encodes `text` into bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` contains a character this encoding cannot
    /// represent.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => text
                .chars()
                .map(|ch| {
                    if ch.is_ascii() {
                        Ok(ch as u8)
                    } else {
                        Err(EncodingError::Unrepresentable { ch, encoding: self })
                    }
                })
                .collect(),
            Self::Latin1 => text
                .chars()
                .map(|ch| {
                    u8::try_from(u32::from(ch))
                        .map_err(|_| EncodingError::Unrepresentable { ch, encoding: self })
                })
                .collect(),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
        }
    }

    /// Decodes `bytes` into text.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid sequence in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            Self::Utf8 => {
                String::from_utf8(bytes.to_vec()).map_err(|_| EncodingError::Malformed(self))
            }
            Self::Ascii => {
                if bytes.is_ascii() {
                    Ok(bytes.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(EncodingError::Malformed(self))
                }
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf16Le | Self::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(EncodingError::Malformed(self));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| {
                        let pair = [pair[0], pair[1]];
                        if self == Self::Utf16Le {
                            u16::from_le_bytes(pair)
                        } else {
                            u16::from_be_bytes(pair)
                        }
                    })
                    .collect();
                String::from_utf16(&units).map_err(|_| EncodingError::Malformed(self))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_labels() {
        assert_eq!(Encoding::from_str("utf-8"), Ok(Encoding::Utf8));
        assert_eq!(Encoding::from_str("utf8"), Ok(Encoding::Utf8));
        assert_eq!(Encoding::from_str("iso-8859-1"), Ok(Encoding::Latin1));
        assert_eq!(Encoding::from_str("UTF-16BE"), Ok(Encoding::Utf16Be));
        assert!(Encoding::from_str("ebcdic").is_err());
        assert_eq!(Encoding::Utf16Le.to_string(), "utf-16le");
        assert_eq!(Encoding::default(), Encoding::Utf8);
    }

    #[test]
    fn latin1() {
        let bytes = Encoding::Latin1.encode("café").unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(Encoding::Latin1.decode(&bytes).unwrap(), "café");
        assert_eq!(
            Encoding::Latin1.encode("€"),
            Err(EncodingError::Unrepresentable {
                ch: '€',
                encoding: Encoding::Latin1
            })
        );
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        assert_eq!(
            Encoding::Ascii.decode(&[b'a', 0xE9]),
            Err(EncodingError::Malformed(Encoding::Ascii))
        );
        assert!(Encoding::Ascii.encode("é").is_err());
    }

    #[test]
    fn utf16() {
        assert_eq!(Encoding::Utf16Le.encode("a,").unwrap(), vec![b'a', 0, b',', 0]);
        assert_eq!(Encoding::Utf16Be.encode("a,").unwrap(), vec![0, b'a', 0, b',']);
        assert_eq!(Encoding::Utf16Be.decode(&[0, b'h', 0, b'i']).unwrap(), "hi");
        assert!(Encoding::Utf16Le.decode(&[b'h']).is_err());
        assert_eq!(Encoding::Utf16Le.unit_width(), 2);
        assert_eq!(Encoding::Utf16Be.newline(), Encoding::Utf16Be.encode("\n").unwrap());
    }

    #[test]
    fn utf8_malformed() {
        assert_eq!(
            Encoding::Utf8.decode(&[0xFF, 0xFE]),
            Err(EncodingError::Malformed(Encoding::Utf8))
        );
    }
}
