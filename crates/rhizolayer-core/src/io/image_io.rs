use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{Result, RhizoError};
use crate::frame::{Frame, Mask};

/// Load a scan image as BT.601 grayscale in [0.0, 1.0].
pub fn load_image(path: &Path) -> Result<Frame> {
    if !path.is_file() {
        return Err(RhizoError::MissingInput(path.to_path_buf()));
    }
    let rgb = image::open(path)?.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for (col, row, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let luma = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
        data[[row as usize, col as usize]] = luma / 255.0;
    }

    Ok(Frame::new(data))
}

/// Load a segmentation mask. A pixel is foreground when its blue channel is
/// non-zero, the first channel in BGR order. Grayscale masks read the same on
/// every channel.
pub fn load_mask(path: &Path) -> Result<Mask> {
    if !path.is_file() {
        return Err(RhizoError::MissingInput(path.to_path_buf()));
    }
    let rgb = image::open(path)?.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut data = Array2::from_elem((h as usize, w as usize), false);

    for (col, row, pixel) in rgb.enumerate_pixels() {
        data[[row as usize, col as usize]] = pixel.0[2] != 0;
    }

    Ok(Mask::new(data))
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a mask as 8-bit PNG with foreground at 255.
pub fn save_mask_png(mask: &Mask, path: &Path) -> Result<()> {
    let h = mask.height();
    let w = mask.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = if mask.data[[row, col]] { 255 } else { 0 };
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
