pub mod error;
pub mod tesseract;

pub use error::InferenceError;
pub use tesseract::TesseractRecognizer;

use image::RgbImage;

/// Optical character recognition over a decoded page image.
pub trait TextRecognizer: Send + Sync {
    /// Returns the text found in `image` as a single blob.
    fn recognize(&self, image: &RgbImage) -> Result<String, InferenceError>;
}
