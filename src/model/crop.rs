//! Crop rectangle entered by the user.

use crate::constants::fields;
use crate::error::ProcessingError;

/// Crop rectangle in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropParameters {
    /// Left edge
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Width of the crop area
    pub width: i64,
    /// Height of the crop area
    pub height: i64,
}

impl Default for CropParameters {
    /// The server's own defaults when a field is omitted.
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 100,
            height: 100,
        }
    }
}

impl CropParameters {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parse the four crop fields from raw input text.
    pub fn parse(x: &str, y: &str, width: &str, height: &str) -> Result<Self, ProcessingError> {
        Ok(Self {
            x: parse_field(fields::X, x)?,
            y: parse_field(fields::Y, y)?,
            width: parse_field(fields::WIDTH, width)?,
            height: parse_field(fields::HEIGHT, height)?,
        })
    }

    /// The fields as `(name, value)` pairs in submission order.
    pub fn to_fields(&self) -> [(&'static str, String); 4] {
        [
            (fields::X, self.x.to_string()),
            (fields::Y, self.y.to_string()),
            (fields::WIDTH, self.width.to_string()),
            (fields::HEIGHT, self.height.to_string()),
        ]
    }
}

/// Lenient integer parse: leading whitespace and an optional sign, then the
/// leading run of decimal digits. Anything after the digits is ignored.
fn parse_field(field: &'static str, raw: &str) -> Result<i64, ProcessingError> {
    let invalid = || ProcessingError::InvalidCropField {
        field,
        value: raw.to_string(),
    };

    let text = raw.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(invalid());
    }

    let magnitude: i64 = unsigned[..digits_len].parse().map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        let crop = CropParameters::parse("10", "20", "100", "50").unwrap();
        assert_eq!(crop, CropParameters::new(10, 20, 100, 50));
    }

    #[test]
    fn test_parse_is_lenient_like_number_fields() {
        let crop = CropParameters::parse("  7", "-3", "12.9", "40px").unwrap();
        assert_eq!(crop, CropParameters::new(7, -3, 12, 40));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = CropParameters::parse("10", "", "100", "50").unwrap_err();
        match err {
            ProcessingError::InvalidCropField { field, value } => {
                assert_eq!(field, "y");
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(CropParameters::parse("abc", "0", "0", "0").is_err());
        assert!(CropParameters::parse("-", "0", "0", "0").is_err());
        assert!(CropParameters::parse("99999999999999999999", "0", "0", "0").is_err());
    }

    #[test]
    fn test_fields_order() {
        let names: Vec<_> = CropParameters::default()
            .to_fields()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, ["x", "y", "width", "height"]);
    }
}
