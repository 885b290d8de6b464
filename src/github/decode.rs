// src/github/decode.rs
// =============================================================================
// Turns an encoded content payload into text.
//
// The contents API returns files as base64 with a line break every 60
// characters. Those breaks have to go before the payload is decoded. Bytes
// that are not valid UTF-8 are replaced with U+FFFD rather than failing the
// file, so binary files still show up in the export (as noise).
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::provider::EncodedContent;
use crate::error::DecodeError;

pub fn decode_content(content: &EncodedContent) -> Result<String, DecodeError> {
    if !content.encoding.eq_ignore_ascii_case("base64") {
        return Err(DecodeError::UnsupportedEncoding(content.encoding.clone()));
    }

    let compact: String = content
        .payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base64(payload: &str) -> EncodedContent {
        EncodedContent {
            encoding: "base64".to_string(),
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_decode_wrapped_payload() {
        // "fn main() {}\n" split the way the API wraps lines
        let content = base64("Zm4gbWFp\nbigpIHt9\nCg==\n");
        assert_eq!(decode_content(&content).unwrap(), "fn main() {}\n");
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        // 0xff 0x41
        let content = base64("/0E=");
        assert_eq!(decode_content(&content).unwrap(), "\u{fffd}A");
    }

    #[test]
    fn test_reject_unknown_encoding() {
        let content = EncodedContent {
            encoding: "none".to_string(),
            payload: String::new(),
        };
        assert_eq!(
            decode_content(&content),
            Err(DecodeError::UnsupportedEncoding("none".to_string()))
        );
    }

    #[test]
    fn test_reject_garbage() {
        assert!(matches!(
            decode_content(&base64("not base64!")),
            Err(DecodeError::InvalidBase64(_))
        ));
    }
}
