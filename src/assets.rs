use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::AssetError;

/// Pixel size of the generated placeholder images.
pub const PLACEHOLDER_SIZE: [u32; 2] = [200, 300];

/// Decode an image file into RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Load `path` if given, otherwise (or on failure) use `fallback`.
pub fn load_or(path: Option<&Path>, fallback: fn() -> RgbaImage) -> RgbaImage {
    match path.map(load_image) {
        Some(Ok(image)) => {
            log::info!("Loaded image {}x{}", image.width(), image.height());
            image
        }
        Some(Err(err)) => {
            log::warn!("{err}; using placeholder");
            fallback()
        }
        None => fallback(),
    }
}

/// Backdrop shown under the canvas when no image is configured:
/// a dusk gradient with a faint grid.
pub fn placeholder_backdrop() -> RgbaImage {
    let [width, height] = PLACEHOLDER_SIZE;
    RgbaImage::from_fn(width, height, |x, y| {
        let t = y as f32 / height as f32;
        let grid = x % 20 == 0 || y % 20 == 0;
        let shade = if grid { 12.0 } else { 0.0 };
        Rgba([
            lerp(250.0, 196.0, t) as u8 - shade as u8,
            lerp(224.0, 170.0, t) as u8 - shade as u8,
            lerp(196.0, 214.0, t) as u8 - shade as u8,
            255,
        ])
    })
}

/// Reverse face of the flip card: a blue card back with a diamond lattice.
pub fn placeholder_card_back() -> RgbaImage {
    let [width, height] = PLACEHOLDER_SIZE;
    let border = 8;
    RgbaImage::from_fn(width, height, |x, y| {
        if x < border || y < border || x >= width - border || y >= height - border {
            return Rgba([255, 255, 255, 255]);
        }
        let diamond = (x + y) % 16 < 2 || (x + height - y) % 16 < 2;
        if diamond {
            Rgba([90, 150, 255, 255])
        } else {
            Rgba([20, 70, 180, 255])
        }
    })
}

/// Convert to the texture format egui uploads.
pub fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_have_expected_size() {
        let backdrop = placeholder_backdrop();
        assert_eq!([backdrop.width(), backdrop.height()], PLACEHOLDER_SIZE);
        let back = placeholder_card_back();
        assert_eq!(back.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let image = load_or(Some(Path::new("/no/such/backdrop.png")), placeholder_card_back);
        assert_eq!(image, placeholder_card_back());
    }

    #[test]
    fn test_color_image_conversion() {
        let image = placeholder_backdrop();
        let color_image = to_color_image(&image);
        assert_eq!(color_image.size, [200, 300]);
        assert_eq!(color_image.pixels.len(), 200 * 300);
    }
}
