//! Decoding of downloaded row images into RGBA buffers ready for upload.

use shared::error::ImageLoadError;
use url::Url;

const MAX_ROW_IMAGE_EDGE: u32 = 512;

pub struct RowImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_row_image(url: &Url, bytes: &[u8]) -> Result<RowImage, ImageLoadError> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| ImageLoadError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })?;
    let oversized =
        dynamic.width() > MAX_ROW_IMAGE_EDGE || dynamic.height() > MAX_ROW_IMAGE_EDGE;
    let resized = if oversized {
        dynamic.thumbnail(MAX_ROW_IMAGE_EDGE, MAX_ROW_IMAGE_EDGE).to_rgba8()
    } else {
        dynamic.to_rgba8()
    };
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(RowImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}
