use std::path::Path;

use image::{ImageDecoder, ImageReader};
use labelset_application::{ApplicationError, ImageInspector};
use labelset_domain::ImageSize;

/// Reads size and channel count from the image header; pixels are never
/// decoded.
#[derive(Debug, Default)]
pub struct ImageCrateInspector;

impl ImageInspector for ImageCrateInspector {
    fn inspect(&self, path: &Path) -> Result<ImageSize, ApplicationError> {
        let decoder = ImageReader::open(path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .into_decoder()
            .map_err(|error| {
                ApplicationError::Decode(format!("{}: {error}", path.display()))
            })?;

        let (width, height) = decoder.dimensions();
        Ok(ImageSize {
            width,
            height,
            depth: decoder.original_color_type().channel_count(),
        })
    }
}
