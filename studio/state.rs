use std::sync::{Arc, Mutex};

use grayscan::{RecognitionClient, Session};

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot banner shown on the next page render, then cleared.
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

/// Everything the studio serves from: the library's session state machine,
/// the client for the recognition collaborator, and a one-shot flash.
pub struct StudioState {
    /// The single live front-end session (image, preview, outcome, phase).
    pub session: Session,
    /// Client for the external recognition backend.
    pub client: RecognitionClient,
    /// One-shot flash message for the next page render.
    pub flash: Option<FlashMessage>,
}

impl StudioState {
    pub fn new(backend_url: &str) -> Self {
        StudioState {
            session: Session::new(),
            client: RecognitionClient::new(backend_url),
            flash: None,
        }
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}

/// Shared state type — an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;
