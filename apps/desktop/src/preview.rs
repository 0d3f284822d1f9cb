use egui::ColorImage;
use image::imageops::FilterType;

/// Bounding box for tree thumbnails.
pub(crate) const THUMB_MAX: u32 = 24;
/// Bounding box for the selected-image preview.
pub(crate) const PREVIEW_MAX: [u32; 2] = [400, 300];

/// Decode raw image bytes and fit the result inside `max_w` x `max_h`
/// (aspect preserved, never upscaled).
pub(crate) fn color_image_from_bytes(
    bytes: &[u8],
    max_w: u32,
    max_h: u32,
) -> Result<ColorImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let scaled = if decoded.width() > max_w || decoded.height() > max_h {
        decoded.resize(max_w, max_h, FilterType::Triangle)
    } else {
        decoded
    };
    let rgba = scaled.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err("Image has no size.".to_string());
    }
    Ok(ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        &rgba.into_raw(),
    ))
}
