pub mod loader;

pub use loader::{load, DecodedImage, ImageCandidate, LoadError, MAX_IMAGE_BYTES};
