use crate::bitmap::Bitmap;

/// Upper bound on an uploaded image payload. Large-but-valid photos fit
/// comfortably; anything past this is rejected before decoding so a hostile
/// upload cannot force a huge decode allocation.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024; // 20 MB

/// A user-supplied file as it arrives from the upload form, before any
/// validation or decoding.
///
/// Fields:
/// - `bytes`      — the raw file contents
/// - `media_type` — the declared MIME type (e.g. `image/png`)
/// - `file_name`  — the original file name, display only
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub file_name: String,
}

/// A successfully loaded image: the decoded bitmap plus the original bytes,
/// which are what gets submitted to the recognition backend (the backend
/// always receives the untouched original, never a converted copy).
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bitmap: Bitmap,
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub file_name: String,
}

/// Why a candidate was rejected. Every variant carries a message suitable for
/// showing to the user directly; none of them alters any session state.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The declared media type is not `image/*`.
    #[error("Please select a valid image file.")]
    NotAnImage,

    /// The upload produced no bytes at all.
    #[error("The selected file is empty.")]
    Empty,

    /// The payload exceeds `MAX_IMAGE_BYTES`.
    #[error("The selected file is too large (limit {} MB).", MAX_IMAGE_BYTES / (1024 * 1024))]
    TooLarge,

    /// The bytes declared an image type but could not be decoded. Surfaced
    /// explicitly rather than silently stalling the ready transition.
    #[error("Could not decode the image: {0}")]
    Decode(String),
}

/// Validates and decodes a candidate into a `DecodedImage`.
///
/// The media type must declare `image/`; the bytes must be non-empty, within
/// the size cap, and decodable by the `image` crate. On any rejection the
/// caller's state is untouched.
pub fn load(candidate: ImageCandidate) -> Result<DecodedImage, LoadError> {
    if !candidate.media_type.starts_with("image/") {
        return Err(LoadError::NotAnImage);
    }
    if candidate.bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    if candidate.bytes.len() > MAX_IMAGE_BYTES {
        return Err(LoadError::TooLarge);
    }

    let decoded = image::load_from_memory(&candidate.bytes)
        .map_err(|e| LoadError::Decode(e.to_string()))?;
    let bitmap = Bitmap::from_dynamic(&decoded);

    log::debug!(
        "loaded {} ({}, {} bytes, {}x{})",
        candidate.file_name,
        candidate.media_type,
        candidate.bytes.len(),
        bitmap.width,
        bitmap.height
    );

    Ok(DecodedImage {
        bitmap,
        bytes: candidate.bytes,
        media_type: candidate.media_type,
        file_name: candidate.file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_candidate() -> ImageCandidate {
        let bmp = Bitmap::from_rgba(2, 2, vec![255, 0, 0, 255].repeat(4));
        ImageCandidate {
            bytes: bmp.to_png_bytes().unwrap(),
            media_type: "image/png".to_owned(),
            file_name: "red.png".to_owned(),
        }
    }

    #[test]
    fn accepts_a_valid_png() {
        let decoded = load(png_candidate()).unwrap();
        assert_eq!(decoded.bitmap.width, 2);
        assert_eq!(decoded.bitmap.height, 2);
        assert_eq!(decoded.bitmap.pixel(0, 0), (255, 0, 0, 255));
        assert_eq!(decoded.media_type, "image/png");
    }

    #[test]
    fn rejects_non_image_media_type() {
        let mut candidate = png_candidate();
        candidate.media_type = "application/pdf".to_owned();
        assert!(matches!(load(candidate), Err(LoadError::NotAnImage)));
    }

    #[test]
    fn rejects_empty_payload() {
        let candidate = ImageCandidate {
            bytes: Vec::new(),
            media_type: "image/png".to_owned(),
            file_name: "empty.png".to_owned(),
        };
        assert!(matches!(load(candidate), Err(LoadError::Empty)));
    }

    #[test]
    fn rejects_oversize_payload() {
        let candidate = ImageCandidate {
            bytes: vec![0u8; MAX_IMAGE_BYTES + 1],
            media_type: "image/png".to_owned(),
            file_name: "big.png".to_owned(),
        };
        assert!(matches!(load(candidate), Err(LoadError::TooLarge)));
    }

    #[test]
    fn malformed_bytes_surface_a_decode_error() {
        let candidate = ImageCandidate {
            bytes: vec![0xDE, 0xAD, 0xBE, 0xEF],
            media_type: "image/png".to_owned(),
            file_name: "broken.png".to_owned(),
        };
        assert!(matches!(load(candidate), Err(LoadError::Decode(_))));
    }
}
