/// Lifecycle of one recognition session.
///
/// The phase alone decides which actions are enabled, so any UI layered on
/// top renders purely from the current `Phase` plus the session's panels:
///
/// ```text
/// Empty ──load──▶ Loaded ──trigger──▶ Recognizing ──success──▶ Recognized
///   ▲                                      │
///   │                                      └──failure──▶ Failed
///   └──────────────── reset (from any phase) ────────────────┘
/// ```
///
/// Loading a new image from Recognized/Failed starts over in Loaded;
/// triggering again from Recognized/Failed re-runs recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No image selected; the action control is disabled.
    Empty,
    /// An image is decoded and previewed; recognition may be triggered.
    Loaded,
    /// A recognition request is in flight; re-triggering is refused.
    Recognizing,
    /// The backend replied; text and (possibly) its grayscale are displayed.
    Recognized,
    /// The backend request failed; the failure text is displayed.
    Failed,
}
