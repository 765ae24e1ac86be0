use crate::bitmap::{to_grayscale, Bitmap};
use crate::loader::DecodedImage;
use crate::recognize::protocol::{decode_reply_image, RecognitionReply};
use crate::session::Phase;

/// Status line shown before any image is selected (and after reset).
pub const STATUS_READY: &str = "Ready to process";
/// Status line once an image has been loaded.
pub const STATUS_LOADED: &str = "Image loaded. Ready to process.";
/// Status line while the backend request is in flight. The local grayscale
/// conversion happens synchronously inside the same trigger, so this is the
/// one status a render can observe for an in-flight round.
pub const STATUS_SUBMITTING: &str = "Grayscale ready locally; sending original to recognition backend...";
/// Status line after a successful round-trip.
pub const STATUS_DONE: &str = "Process complete.";
/// Status line after a failed round-trip.
pub const STATUS_FAILED: &str = "Error during processing. Please try again.";
/// Result-panel text when the backend recognized nothing.
pub const NO_TEXT_PLACEHOLDER: &str = "No text could be recognized.";

/// A transition was requested that the current phase does not allow.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// Recognition was triggered with no image loaded.
    #[error("No image is loaded.")]
    NothingLoaded,

    /// Recognition was triggered while a request is already in flight.
    #[error("A recognition request is already in progress.")]
    InFlight,

    /// A completion/failure arrived outside the Recognizing phase (the
    /// session was reset or replaced while the request was out).
    #[error("No recognition request is in progress.")]
    NotRecognizing,
}

/// What `begin_recognition` hands the caller to submit: a copy of the
/// *original* image bytes and their media type. The locally produced
/// grayscale preview is display-only and never leaves the session.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// Owns all mutable front-end state for one user: the single live source
/// image, the ephemeral local grayscale preview, the latest recognition
/// outcome, and the status line. Replaces the original's ambient globals
/// with one explicit controller object.
pub struct Session {
    phase: Phase,
    image: Option<DecodedImage>,
    local_preview: Option<Bitmap>,
    result_text: Option<String>,
    backend_grayscale: Option<Vec<u8>>,
    grayscale_filename: Option<String>,
    status: String,
}

impl Session {
    pub fn new() -> Session {
        Session {
            phase: Phase::Empty,
            image: None,
            local_preview: None,
            result_text: None,
            backend_grayscale: None,
            grayscale_filename: None,
            status: STATUS_READY.to_owned(),
        }
    }

    // -- transitions --------------------------------------------------------

    /// Installs a freshly loaded image, replacing any previous one and
    /// clearing every prior result panel back to its placeholder. Valid from
    /// any phase except mid-flight; a load during Recognizing is refused so
    /// the outstanding reply cannot attach to the wrong image.
    pub fn load_image(&mut self, image: DecodedImage) -> Result<(), SessionError> {
        if self.phase == Phase::Recognizing {
            return Err(SessionError::InFlight);
        }
        self.image = Some(image);
        self.local_preview = None;
        self.result_text = None;
        self.backend_grayscale = None;
        self.grayscale_filename = None;
        self.phase = Phase::Loaded;
        self.status = STATUS_LOADED.to_owned();
        Ok(())
    }

    /// Starts a recognition round: synchronously computes and stores the
    /// local grayscale preview (immediate feedback), moves to Recognizing,
    /// and returns the original bytes to submit. Refused when nothing is
    /// loaded or a request is already in flight.
    pub fn begin_recognition(&mut self) -> Result<PendingSubmission, SessionError> {
        match self.phase {
            Phase::Empty => return Err(SessionError::NothingLoaded),
            Phase::Recognizing => return Err(SessionError::InFlight),
            Phase::Loaded | Phase::Recognized | Phase::Failed => {}
        }
        let image = self.image.as_ref().ok_or(SessionError::NothingLoaded)?;

        self.local_preview = Some(to_grayscale(&image.bitmap));

        let submission = PendingSubmission {
            bytes: image.bytes.clone(),
            media_type: image.media_type.clone(),
        };
        self.phase = Phase::Recognizing;
        self.status = STATUS_SUBMITTING.to_owned();
        Ok(submission)
    }

    /// Applies a successful backend reply: stores the display text (or the
    /// fixed placeholder when the backend recognized nothing) and, when the
    /// reply carries a grayscale rendition, stores it and remembers its
    /// filename for download. A reply without a rendition leaves the
    /// grayscale panel in its prior state.
    pub fn complete_recognition(
        &mut self,
        reply: RecognitionReply,
    ) -> Result<(), SessionError> {
        if self.phase != Phase::Recognizing {
            return Err(SessionError::NotRecognizing);
        }

        let text = match reply.text {
            Some(t) if !t.trim().is_empty() => t,
            _ => NO_TEXT_PLACEHOLDER.to_owned(),
        };
        self.result_text = Some(text);

        if let Some(encoded) = reply.grayscale_image {
            match decode_reply_image(&encoded) {
                Ok(bytes) => {
                    self.backend_grayscale = Some(bytes);
                    self.grayscale_filename = reply.grayscale_filename;
                }
                Err(e) => {
                    // Un-decodable rendition: keep the panel as it was.
                    log::warn!("discarding undecodable backend grayscale: {e}");
                }
            }
        }

        self.phase = Phase::Recognized;
        self.status = STATUS_DONE.to_owned();
        Ok(())
    }

    /// Applies a failed backend round-trip: the result panel shows the
    /// failure text; every other panel keeps whatever it was showing.
    pub fn fail_recognition(&mut self, message: &str) -> Result<(), SessionError> {
        if self.phase != Phase::Recognizing {
            return Err(SessionError::NotRecognizing);
        }
        self.result_text = Some(format!("Error: {message}"));
        self.phase = Phase::Failed;
        self.status = STATUS_FAILED.to_owned();
        Ok(())
    }

    /// Returns every panel and indicator to the initial state. Valid from
    /// any phase; idempotent.
    pub fn reset(&mut self) {
        *self = Session::new();
    }

    // -- queries ------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True iff the action control should be enabled: an image is loaded and
    /// no request is in flight.
    pub fn can_recognize(&self) -> bool {
        self.image.is_some() && self.phase != Phase::Recognizing
    }

    /// True while a recognition request is outstanding (drives the busy
    /// indicator).
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Recognizing
    }

    pub fn status_line(&self) -> &str {
        &self.status
    }

    /// The single live source image, if any.
    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    /// The locally computed grayscale preview from the current round.
    pub fn local_preview(&self) -> Option<&Bitmap> {
        self.local_preview.as_ref()
    }

    /// Resolved result-panel text; `None` renders the explicit empty state.
    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    /// The backend's grayscale rendition (PNG bytes), once received.
    pub fn backend_grayscale(&self) -> Option<&[u8]> {
        self.backend_grayscale.as_deref()
    }

    /// Filename addressing the backend's grayscale artifact. `None` until a
    /// rendition has been received — download is a no-op then.
    pub fn download_filename(&self) -> Option<&str> {
        self.grayscale_filename.as_deref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load, ImageCandidate};

    fn red_image() -> DecodedImage {
        let bmp = Bitmap::from_rgba(2, 2, vec![255, 0, 0, 255].repeat(4));
        load(ImageCandidate {
            bytes: bmp.to_png_bytes().unwrap(),
            media_type: "image/png".to_owned(),
            file_name: "red.png".to_owned(),
        })
        .unwrap()
    }

    fn reply(text: &str, with_image: bool) -> RecognitionReply {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;
        RecognitionReply {
            text: Some(text.to_owned()),
            grayscale_image: with_image.then(|| STANDARD.encode(b"png-bytes")),
            grayscale_filename: with_image.then(|| "gray.png".to_owned()),
        }
    }

    #[test]
    fn starts_empty_with_action_disabled() {
        let s = Session::new();
        assert_eq!(s.phase(), Phase::Empty);
        assert!(!s.can_recognize());
        assert!(!s.is_busy());
        assert_eq!(s.status_line(), STATUS_READY);
        assert!(s.result_text().is_none());
        assert!(s.download_filename().is_none());
    }

    #[test]
    fn loading_enables_the_action_and_clears_prior_result() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        s.complete_recognition(reply("A", true)).unwrap();
        assert_eq!(s.result_text(), Some("A"));

        // A fresh load wipes the previous round back to placeholders.
        s.load_image(red_image()).unwrap();
        assert_eq!(s.phase(), Phase::Loaded);
        assert!(s.can_recognize());
        assert!(s.result_text().is_none());
        assert!(s.backend_grayscale().is_none());
        assert!(s.download_filename().is_none());
        assert_eq!(s.status_line(), STATUS_LOADED);
    }

    #[test]
    fn recognition_requires_a_loaded_image() {
        let mut s = Session::new();
        assert_eq!(s.begin_recognition().unwrap_err(), SessionError::NothingLoaded);
    }

    #[test]
    fn begin_produces_preview_and_submits_original_bytes() {
        let mut s = Session::new();
        let original_bytes = {
            s.load_image(red_image()).unwrap();
            s.image().unwrap().bytes.clone()
        };
        let pending = s.begin_recognition().unwrap();

        // The submission is the untouched original, not the converted copy.
        assert_eq!(pending.bytes, original_bytes);
        assert_eq!(pending.media_type, "image/png");

        // The local preview is the BT.601 conversion of the loaded bitmap.
        let preview = s.local_preview().unwrap();
        assert_eq!(preview.pixel(0, 0), (76, 76, 76, 255));
        assert!(s.is_busy());
        assert!(!s.can_recognize());
        assert_eq!(s.status_line(), STATUS_SUBMITTING);
    }

    #[test]
    fn second_trigger_while_in_flight_is_refused() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        assert_eq!(s.begin_recognition().unwrap_err(), SessionError::InFlight);
        assert_eq!(s.load_image(red_image()).unwrap_err(), SessionError::InFlight);
    }

    #[test]
    fn success_stores_text_and_remembers_filename() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        s.complete_recognition(reply("A", true)).unwrap();

        assert_eq!(s.phase(), Phase::Recognized);
        assert!(!s.is_busy());
        assert_eq!(s.result_text(), Some("A"));
        assert_eq!(s.backend_grayscale(), Some(&b"png-bytes"[..]));
        assert_eq!(s.download_filename(), Some("gray.png"));
        assert_eq!(s.status_line(), STATUS_DONE);
    }

    #[test]
    fn empty_text_falls_back_to_the_placeholder() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        s.complete_recognition(reply("   ", false)).unwrap();
        assert_eq!(s.result_text(), Some(NO_TEXT_PLACEHOLDER));
        // No rendition in the reply: panel stays in its prior (empty) state.
        assert!(s.backend_grayscale().is_none());
        assert!(s.download_filename().is_none());
    }

    #[test]
    fn failure_shows_the_error_and_keeps_the_image() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        s.fail_recognition("Backend error: 500").unwrap();

        assert_eq!(s.phase(), Phase::Failed);
        assert!(!s.is_busy());
        assert_eq!(s.result_text(), Some("Error: Backend error: 500"));
        assert!(s.image().is_some(), "loaded image survives a failure");
        // The action comes back so the user can retry.
        assert!(s.can_recognize());
    }

    #[test]
    fn completion_after_reset_is_rejected() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        s.reset();
        assert_eq!(
            s.complete_recognition(reply("A", true)).unwrap_err(),
            SessionError::NotRecognizing
        );
    }

    #[test]
    fn reset_restores_the_initial_state_and_is_idempotent() {
        let mut s = Session::new();
        s.load_image(red_image()).unwrap();
        s.begin_recognition().unwrap();
        s.complete_recognition(reply("A", true)).unwrap();

        s.reset();
        s.reset();
        assert_eq!(s.phase(), Phase::Empty);
        assert!(s.image().is_none());
        assert!(s.local_preview().is_none());
        assert!(s.result_text().is_none());
        assert!(s.backend_grayscale().is_none());
        assert!(s.download_filename().is_none());
        assert_eq!(s.status_line(), STATUS_READY);
        assert!(!s.can_recognize());
    }
}
