//! Raster decoding with format sniffing and EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, SourceImage};

/// Decode an image file from bytes, applying EXIF orientation correction.
///
/// The format is detected from the content, not from a file name. Any
/// format enabled on the `image` crate is accepted.
///
/// # Errors
///
/// - `DecodeError::Empty` for an empty slice
/// - `DecodeError::InvalidFormat` if the format cannot be recognized
/// - `DecodeError::CorruptedFile` if the decoder fails
/// - `DecodeError::ZeroSized` if the image has no pixels
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::ZeroSized {
            width: img.width(),
            height: img.height(),
        });
    }

    let orientation = extract_orientation(bytes);
    let oriented = apply_orientation(img, orientation);

    let image = SourceImage::from_rgba_image(oriented.into_rgba8());
    tracing::debug!(
        ?format,
        ?orientation,
        width = image.width,
        height = image.height,
        "decoded source image"
    );
    Ok(image)
}

/// Extract the EXIF orientation from image bytes (for external use).
///
/// Returns `Orientation::Normal` when there is no EXIF block.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
