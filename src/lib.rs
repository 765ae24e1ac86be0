pub mod bitmap;
pub mod loader;
pub mod recognize;
pub mod session;

// Convenience re-exports
pub use bitmap::{to_grayscale, Bitmap};
pub use loader::{load, DecodedImage, ImageCandidate, LoadError};
pub use recognize::{RecognitionClient, RecognitionReply, RecognizeError};
pub use session::{Phase, Session, SessionError};
