use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Request body for the recognition endpoint: the original image as a
/// base64 data URI under a single `image` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionRequest {
    pub image: String,
}

/// Response body from the recognition endpoint.
///
/// All fields are optional so partial backends deserialize cleanly:
/// - `text`               — the recognized text, possibly empty
/// - `grayscale_image`    — base64 PNG of the backend's grayscale rendition
/// - `grayscale_filename` — server-side name of that rendition, used to
///                          address the download endpoint later; present
///                          iff `grayscale_image` is present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionReply {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub grayscale_image: Option<String>,
    #[serde(default)]
    pub grayscale_filename: Option<String>,
}

/// Wraps raw image bytes in a `data:<media type>;base64,...` URI, the
/// transport encoding the recognition endpoint expects.
pub fn encode_data_uri(bytes: &[u8], media_type: &str) -> String {
    format!("data:{};base64,{}", media_type, BASE64.encode(bytes))
}

/// Decodes the base64 image a reply carries back into raw bytes.
pub fn decode_reply_image(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(encoded.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_carries_media_type_and_base64_payload() {
        let uri = encode_data_uri(b"abc", "image/png");
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn reply_image_round_trips() {
        let bytes = vec![1u8, 2, 3, 4, 255];
        let encoded = BASE64.encode(&bytes);
        assert_eq!(decode_reply_image(&encoded).unwrap(), bytes);
    }

    #[test]
    fn reply_tolerates_missing_fields_and_extras() {
        let reply: RecognitionReply =
            serde_json::from_str(r#"{"text":"hi","status":"success"}"#).unwrap();
        assert_eq!(reply.text.as_deref(), Some("hi"));
        assert!(reply.grayscale_image.is_none());
        assert!(reply.grayscale_filename.is_none());

        let empty: RecognitionReply = serde_json::from_str("{}").unwrap();
        assert!(empty.text.is_none());
    }
}
