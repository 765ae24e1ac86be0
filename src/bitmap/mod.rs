pub mod bitmap;
pub mod grayscale;

pub use bitmap::Bitmap;
pub use grayscale::to_grayscale;
