//! Data URL encoding for inline image sources.
//!
//! Only the `data:<mime>;base64,<payload>` form is produced or accepted.

use crate::error::ProcessingError;

const PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Encode bytes as a base64 data URL with the given MIME type.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    from_base64(mime, &base64::encode(bytes))
}

/// Build a data URL around an already base64-encoded payload.
pub fn from_base64(mime: &str, payload: &str) -> String {
    format!("{PREFIX}{mime}{BASE64_MARKER}{payload}")
}

/// Split a base64 data URL into its MIME type and decoded bytes.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), ProcessingError> {
    let rest = url
        .strip_prefix(PREFIX)
        .ok_or_else(|| ProcessingError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| ProcessingError::InvalidDataUrl("not base64 encoded".to_string()))?;
    let bytes = base64::decode(payload)?;
    Ok((mime.to_string(), bytes))
}
