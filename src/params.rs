//! Parsing and validation of user-supplied render parameters.

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// Recovers ~7% of codewords.
    #[default]
    #[serde(rename = "L")]
    Low,
    /// Recovers ~15% of codewords.
    #[serde(rename = "M")]
    Medium,
    /// Recovers ~25% of codewords.
    #[serde(rename = "Q")]
    Quartile,
    /// Recovers ~30% of codewords.
    #[serde(rename = "H")]
    High,
}

/// Parse an export size in pixels.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSize`] if the value is not a positive integer.
pub fn parse_size(input: &str) -> Result<u32, ExportError> {
    match input.trim().parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n)
            .map_err(|_| ExportError::InvalidSize(format!("'{input}' is too large"))),
        Ok(_) => Err(ExportError::InvalidSize(format!("'{input}' must be greater than zero"))),
        Err(_) => Err(ExportError::InvalidSize(format!("'{input}' is not a number"))),
    }
}

/// Parse an error-correction level: `L`, `M`, `Q` or `H` (case-insensitive).
///
/// # Errors
///
/// Returns an error if the level is not recognized.
pub fn parse_level(input: &str) -> Result<ErrorCorrection, ExportError> {
    match input.to_ascii_uppercase().as_str() {
        "L" => Ok(ErrorCorrection::Low),
        "M" => Ok(ErrorCorrection::Medium),
        "Q" => Ok(ErrorCorrection::Quartile),
        "H" => Ok(ErrorCorrection::High),
        _ => Err(ExportError::InvalidArgument(format!(
            "Unsupported error-correction level '{input}'. Valid: L, M, Q, H"
        ))),
    }
}

/// Parse a colour as `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
///
/// # Errors
///
/// Returns an error if the colour is malformed.
pub fn parse_color(input: &str) -> Result<[u8; 4], ExportError> {
    let invalid = || {
        ExportError::InvalidArgument(format!(
            "Unsupported color '{input}'. Use #rgb, #rrggbb, #rrggbbaa or transparent"
        ))
    };

    if input.eq_ignore_ascii_case("transparent") {
        return Ok([0, 0, 0, 0]);
    }
    let hex = input.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut rgba = [0, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgba[i] = v * 17;
            }
            Ok(rgba)
        }
        6 => Ok([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255]),
        8 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        ]),
        _ => Err(invalid()),
    }
}

/// Validate the text to encode.
///
/// # Errors
///
/// Returns an error if the text is empty; there is nothing to export.
pub fn validate_text(text: &str) -> Result<(), ExportError> {
    if text.is_empty() {
        Err(ExportError::InvalidArgument("Provide text to encode".to_string()))
    } else {
        Ok(())
    }
}
