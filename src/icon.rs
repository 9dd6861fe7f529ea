use image::{Rgba, RgbaImage};

use crate::color::{Color, DEFAULT_ARROW, DEFAULT_BACKGROUND};
use crate::geometry::{ARROWS, BACKGROUND, REFERENCE_SIZE};

/// Edge length of the master canvas every output is downsampled from.
pub const MASTER_SIZE: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconStyle {
    pub background: Color,
    pub arrow: Color,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            arrow: DEFAULT_ARROW,
        }
    }
}

// Render the sort icon (rounded background + up/down arrows) at MASTER_SIZE
pub fn render_master(style: &IconStyle) -> RgbaImage {
    render(MASTER_SIZE, style)
}

/// Render the icon at an arbitrary edge length, scaling the reference geometry.
/// Shapes overwrite what is below them, they are not blended.
pub fn render(size: u32, style: &IconStyle) -> RgbaImage {
    let scale = size as f32 / REFERENCE_SIZE as f32;
    let background: Rgba<u8> = style.background.into();
    let arrow: Rgba<u8> = style.arrow.into();

    let mut img = RgbaImage::new(size, size);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        // Pixel centre mapped back into reference units.
        let rx = (x as f32 + 0.5) / scale - 0.5;
        let ry = (y as f32 + 0.5) / scale - 0.5;

        if ARROWS.iter().any(|glyph| glyph.contains(rx, ry)) {
            *pixel = arrow;
        } else if BACKGROUND.contains(rx, ry) {
            *pixel = background;
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_master_dimensions() {
        let img = render_master(&IconStyle::default());
        assert_eq!(img.dimensions(), (MASTER_SIZE, MASTER_SIZE));
    }

    #[test]
    fn test_master_regions() {
        let style = IconStyle {
            background: Color::rgb(10, 20, 30),
            arrow: Color::rgb(200, 100, 50),
        };
        let img = render_master(&style);
        // outside the inset and in the rounded-off corner
        assert_eq!(*img.get_pixel(5, 5), TRANSPARENT);
        assert_eq!(*img.get_pixel(22, 22), TRANSPARENT);
        assert_eq!(*img.get_pixel(511, 256), TRANSPARENT);
        // background between the glyphs
        assert_eq!(*img.get_pixel(256, 256), Rgba([10, 20, 30, 255]));
        assert_eq!(*img.get_pixel(20, 256), Rgba([10, 20, 30, 255]));
        // arrow heads and shafts
        assert_eq!(*img.get_pixel(160, 200), Rgba([200, 100, 50, 255]));
        assert_eq!(*img.get_pixel(160, 350), Rgba([200, 100, 50, 255]));
        assert_eq!(*img.get_pixel(352, 350), Rgba([200, 100, 50, 255]));
        assert_eq!(*img.get_pixel(352, 150), Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_translucent_colors_replace_pixels() {
        let style = IconStyle {
            background: Color::rgba(255, 0, 0, 255),
            arrow: Color::rgba(0, 0, 255, 128),
        };
        let img = render_master(&style);
        assert_eq!(*img.get_pixel(160, 350), Rgba([0, 0, 255, 128]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let style = IconStyle::default();
        assert_eq!(render_master(&style).into_raw(), render_master(&style).into_raw());
    }

    #[test]
    fn test_render_scales_geometry() {
        let style = IconStyle::default();
        let big = render(1024, &style);
        let arrow: Rgba<u8> = DEFAULT_ARROW.into();
        let background: Rgba<u8> = DEFAULT_BACKGROUND.into();
        assert_eq!(*big.get_pixel(320, 700), arrow);
        assert_eq!(*big.get_pixel(512, 512), background);
        assert_eq!(*big.get_pixel(10, 10), TRANSPARENT);
    }
}
