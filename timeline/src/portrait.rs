//! Portrait loading with a placeholder fallback

use glam::Vec2;
use std::path::Path;

pub const PLACEHOLDER_TEXT: &str = "No Image";

/// A decoded portrait, or the placeholder drawn in its place
pub enum Portrait {
    Image(egui::ColorImage),
    Placeholder,
}

impl Portrait {
    /// Decode `path`; unreadable files are logged and become a placeholder
    pub fn load(path: &Path) -> Self {
        match decode(path) {
            Ok(image) => {
                log::debug!("loaded {} ({}x{})", path.display(), image.size[0], image.size[1]);
                Portrait::Image(image)
            }
            Err(err) => {
                log::warn!("could not load image {}: {err}", path.display());
                Portrait::Placeholder
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Portrait::Placeholder)
    }

    /// Pixel size as width × height
    pub fn size(&self) -> Option<Vec2> {
        match self {
            Portrait::Image(image) => Some(Vec2::new(image.size[0] as f32, image.size[1] as f32)),
            Portrait::Placeholder => None,
        }
    }
}

pub fn decode(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}

/// Largest size with the aspect ratio of `size` that fits inside `bounds`
pub fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y).max(0.0);
    size * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const EPS: f32 = 1e-5;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("timeline-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_placeholder() {
        let portrait = Portrait::load(Path::new("does/not/exist.jpg"));
        assert!(portrait.is_placeholder());
        assert!(portrait.size().is_none());
    }

    #[test]
    fn test_garbage_file_gives_placeholder() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"not a png").unwrap();
        let portrait = Portrait::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(portrait.is_placeholder());
    }

    #[test]
    fn test_decodes_png() {
        let path = temp_path("portrait.png");
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let portrait = Portrait::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(portrait.size(), Some(Vec2::new(4.0, 2.0)));
        let Portrait::Image(image) = portrait else {
            panic!("expected an image");
        };
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let wide = fit_within(Vec2::new(400.0, 200.0), Vec2::new(1.0, 1.0));
        assert!((wide - Vec2::new(1.0, 0.5)).length() < EPS);

        let tall = fit_within(Vec2::new(300.0, 600.0), Vec2::new(1.2, 0.96));
        assert!((tall - Vec2::new(0.48, 0.96)).length() < EPS);

        assert_eq!(fit_within(Vec2::ZERO, Vec2::ONE), Vec2::ZERO);
    }
}
