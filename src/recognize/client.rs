use crate::recognize::protocol::{encode_data_uri, RecognitionReply, RecognitionRequest};

/// Failures while talking to the recognition backend. Every non-success
/// status collapses into `Status` — the front-end treats all of them as one
/// uniform "backend error" whose message carries the numeric code.
#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    /// The backend answered with a non-success HTTP status.
    #[error("Backend error: {0}")]
    Status(u16),

    /// The request never completed (connection refused, DNS, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend named a grayscale artifact we asked for, but serving it
    /// failed.
    #[error("Download failed for '{filename}': status {status}")]
    Download { filename: String, status: u16 },
}

/// Blocking HTTP client for the external recognition collaborator.
///
/// The collaborator exposes two endpoints under a common base URL:
/// - `POST /api/recognize` — JSON in (data-URI image), JSON out (text plus
///   an optional grayscale rendition and its filename)
/// - `GET /api/download-grayscale/<filename>` — the binary artifact named by
///   a previous recognition reply
///
/// Cloning is cheap: the underlying `reqwest` client is reference-counted,
/// so handlers clone this out of shared state rather than holding the state
/// lock across a network call.
#[derive(Clone)]
pub struct RecognitionClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl RecognitionClient {
    /// Creates a client against `base_url` (scheme + host + port, no
    /// trailing slash required).
    pub fn new(base_url: impl Into<String>) -> RecognitionClient {
        RecognitionClient {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Submits the *original* image bytes for recognition and returns the
    /// parsed reply. The grayscale preview shown locally never travels over
    /// this wire.
    pub fn recognize(
        &self,
        image_bytes: &[u8],
        media_type: &str,
    ) -> Result<RecognitionReply, RecognizeError> {
        let body = RecognitionRequest {
            image: encode_data_uri(image_bytes, media_type),
        };

        log::info!(
            "submitting {} bytes ({}) to {}/api/recognize",
            image_bytes.len(),
            media_type,
            self.base_url
        );

        let response = self
            .http
            .post(format!("{}/api/recognize", self.base_url))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognizeError::Status(status.as_u16()));
        }

        Ok(response.json::<RecognitionReply>()?)
    }

    /// Fetches a previously produced grayscale artifact by its filename.
    pub fn fetch_grayscale(&self, filename: &str) -> Result<Vec<u8>, RecognizeError> {
        let response = self
            .http
            .get(format!("{}/api/download-grayscale/{}", self.base_url, filename))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognizeError::Download {
                filename: filename.to_owned(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_contains_the_code() {
        let msg = RecognizeError::Status(500).to_string();
        assert!(msg.contains("500"), "got: {msg}");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = RecognitionClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
