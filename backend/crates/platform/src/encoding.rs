//! Encoding Utilities
//!
//! Base64, hex, data URI and payment card number checks.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Binary text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryEncoding {
    Base64,
    Hex,
    #[default]
    Utf8,
}

impl BinaryEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryEncoding::Base64 => "base64",
            BinaryEncoding::Hex => "hex",
            BinaryEncoding::Utf8 => "utf8",
        }
    }

    /// Decode `input` to raw bytes
    pub fn decode(&self, input: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            BinaryEncoding::Base64 => decode_base64(input, false, false),
            BinaryEncoding::Hex => Ok(hex::decode(input)?),
            BinaryEncoding::Utf8 => Ok(input.as_bytes().to_vec()),
        }
    }
}

fn base64_engine(padding_required: bool, url_safe: bool) -> GeneralPurpose {
    let padding = if padding_required {
        DecodePaddingMode::RequireCanonical
    } else {
        DecodePaddingMode::Indifferent
    };
    let config = GeneralPurposeConfig::new().with_decode_padding_mode(padding);
    let alphabet = if url_safe {
        &alphabet::URL_SAFE
    } else {
        &alphabet::STANDARD
    };
    GeneralPurpose::new(alphabet, config)
}

/// Decode base64 to bytes
pub fn decode_base64(
    input: &str,
    padding_required: bool,
    url_safe: bool,
) -> Result<Vec<u8>, EncodingError> {
    Ok(base64_engine(padding_required, url_safe).decode(input)?)
}

/// Check base64 text
pub fn is_base64(input: &str, padding_required: bool, url_safe: bool) -> bool {
    !input.is_empty() && decode_base64(input, padding_required, url_safe).is_ok()
}

/// Check hex digits (any length)
pub fn is_hex(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_hexdigit())
}

/// Prepend `0` to odd-length hex so it is byte aligned
pub fn align_hex(input: &str) -> String {
    if input.len() % 2 == 1 {
        format!("0{}", input)
    } else {
        input.to_string()
    }
}

/// Check `data:<type>/<subtype>;[charset=<cs>,|base64,]<data>`
///
/// Base64 data must decode; other data is not inspected.
pub fn is_data_uri(input: &str, padding_required: bool) -> bool {
    let Some((media_type, rest)) = input
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(';'))
    else {
        return false;
    };

    let is_media_char = |c: char| c.is_ascii_alphanumeric() || "_+.-".contains(c);
    let valid_media = media_type.split_once('/').is_some_and(|(top, sub)| {
        !top.is_empty()
            && !sub.is_empty()
            && top.chars().all(is_media_char)
            && sub.chars().all(is_media_char)
    });
    if !valid_media {
        return false;
    }

    if let Some(data) = rest.strip_prefix("base64,") {
        decode_base64(data, padding_required, false).is_ok()
    } else if let Some(params) = rest.strip_prefix("charset=") {
        let is_charset_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        params
            .split_once(',')
            .is_some_and(|(charset, _)| !charset.is_empty() && charset.chars().all(is_charset_char))
    } else {
        true
    }
}

/// Check a payment card number with the Luhn checksum
pub fn is_credit_card(input: &str) -> bool {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = input
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}
