use iced::widget::image::Handle;
use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::sprite::LoadedImage;
use crate::state::tint::{Readouts, TintParams};

/// How a fill combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over everything
    #[default]
    SourceOver,
    /// Paint only where the surface already has content, keeping its alpha
    SourceAtop,
}

/// Fixed-size RGBA drawing surface
///
/// Only [`Surface::redraw`] and [`Surface::clear`] change the pixels. The
/// frame is exposed to the view as an iced image handle, rebuilt after each
/// change.
pub struct Surface {
    frame: RgbaImage,
    composite: CompositeMode,
    handle: Handle,
}

impl Surface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        let frame = RgbaImage::new(width, height);
        let handle = to_handle(&frame);
        Self {
            frame,
            composite: CompositeMode::default(),
            handle,
        }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Current pixels
    #[cfg(test)]
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Image handle for the view
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Wipe the surface to transparent
    pub fn clear(&mut self) {
        self.clear_pixels();
        self.present();
    }

    /// Redraw from the loaded image and the current tint
    ///
    /// Does nothing (and returns `false`) unless the image is fully decoded;
    /// whatever was on the surface before stays visible in that case.
    pub fn redraw(&mut self, image: &LoadedImage, tint: &TintParams, readouts: &mut Readouts) -> bool {
        let Some(source) = image.ready() else {
            return false;
        };

        readouts.refresh(tint);

        let fill = tint.fill();
        log::trace!("Redrawing with tint {}", fill.css());

        self.clear_pixels();
        self.draw_image(source);

        // Recolor the opaque pixels, then go back to normal painting
        self.composite = CompositeMode::SourceAtop;
        self.fill(fill.to_rgba());
        self.composite = CompositeMode::SourceOver;

        self.present();
        true
    }

    fn clear_pixels(&mut self) {
        for pixel in self.frame.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Draw `source` stretched to the whole surface
    fn draw_image(&mut self, source: &RgbaImage) {
        let (width, height) = self.frame.dimensions();
        let scaled = if source.dimensions() == (width, height) {
            source.clone()
        } else {
            imageops::resize(source, width, height, FilterType::Triangle)
        };

        // The surface was just cleared, so source-over is a plain copy
        self.frame = scaled;
    }

    /// Fill the whole surface with an opaque color using the current mode
    fn fill(&mut self, color: Rgba<u8>) {
        let [r, g, b, _] = color.0;
        match self.composite {
            CompositeMode::SourceOver => {
                for pixel in self.frame.pixels_mut() {
                    *pixel = Rgba([r, g, b, 255]);
                }
            }
            CompositeMode::SourceAtop => {
                // Opaque source: result color is the source, alpha is the destination's
                for pixel in self.frame.pixels_mut() {
                    let alpha = pixel.0[3];
                    if alpha != 0 {
                        *pixel = Rgba([r, g, b, alpha]);
                    }
                }
            }
        }
    }

    fn present(&mut self) {
        self.handle = to_handle(&self.frame);
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.frame.width())
            .field("height", &self.frame.height())
            .field("composite", &self.composite)
            .finish()
    }
}

fn to_handle(frame: &RgbaImage) -> Handle {
    Handle::from_rgba(frame.width(), frame.height(), frame.as_raw().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 sprite: opaque red, half-transparent blue, two transparent pixels
    fn sprite() -> RgbaImage {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 128]));
        image
    }

    fn green_tint() -> TintParams {
        // hsv(120, 100%, 100%) -> l = 50%, s = 200% (clamped) -> pure green
        TintParams { hue: 120, saturation: 100, value: 100 }
    }

    #[test]
    fn test_tint_only_touches_opaque_pixels() {
        let mut surface = Surface::new(2, 2);
        let mut readouts = Readouts::default();
        let image = LoadedImage::Decoded(sprite());

        assert!(surface.redraw(&image, &green_tint(), &mut readouts));

        let frame = surface.frame();
        assert_eq!(frame.get_pixel(0, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(frame.get_pixel(1, 0), &Rgba([0, 255, 0, 128]));
        assert_eq!(frame.get_pixel(0, 1).0[3], 0);
        assert_eq!(frame.get_pixel(1, 1).0[3], 0);
    }

    #[test]
    fn test_redraw_does_not_accumulate() {
        let mut surface = Surface::new(2, 2);
        let mut readouts = Readouts::default();
        let image = LoadedImage::Decoded(sprite());

        surface.redraw(&image, &green_tint(), &mut readouts);
        let first = surface.frame().clone();
        surface.redraw(&image, &green_tint(), &mut readouts);
        assert_eq!(surface.frame(), &first);

        // A different tint fully replaces the previous one
        let black = TintParams { hue: 0, saturation: 0, value: 0 };
        surface.redraw(&image, &black, &mut readouts);
        assert_eq!(surface.frame().get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(surface.frame().get_pixel(1, 0), &Rgba([0, 0, 0, 128]));
    }

    #[test]
    fn test_image_is_scaled_to_surface() {
        let mut surface = Surface::new(8, 6);
        let mut readouts = Readouts::default();
        let image = LoadedImage::Decoded(RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])));

        assert!(surface.redraw(&image, &green_tint(), &mut readouts));
        assert_eq!(surface.frame().dimensions(), (8, 6));
        assert!(surface.frame().pixels().all(|p| p.0[..3] == [0, 255, 0] && p.0[3] > 0));
    }

    #[test]
    fn test_undecoded_image_keeps_previous_frame() {
        let mut surface = Surface::new(2, 2);
        let mut readouts = Readouts::default();
        surface.redraw(&LoadedImage::Decoded(sprite()), &green_tint(), &mut readouts);
        let before = surface.frame().clone();
        let readouts_before = readouts.clone();

        let other = TintParams { hue: 10, saturation: 20, value: 30 };
        assert!(!surface.redraw(&LoadedImage::Pending(3), &other, &mut readouts));
        assert!(!surface.redraw(&LoadedImage::Idle, &other, &mut readouts));
        assert!(!surface.redraw(&LoadedImage::Decoded(RgbaImage::new(0, 0)), &other, &mut readouts));

        assert_eq!(surface.frame(), &before);
        assert_eq!(readouts, readouts_before);
    }

    #[test]
    fn test_redraw_refreshes_readouts() {
        let mut surface = Surface::new(2, 2);
        let mut readouts = Readouts::default();
        let tint = TintParams { hue: 200, saturation: 35, value: 90 };
        surface.redraw(&LoadedImage::Decoded(sprite()), &tint, &mut readouts);
        assert_eq!((readouts.hue.as_str(), readouts.saturation.as_str(), readouts.value.as_str()), ("200", "35", "90"));
    }

    #[test]
    fn test_clear() {
        let mut surface = Surface::new(2, 2);
        let mut readouts = Readouts::default();
        surface.redraw(&LoadedImage::Decoded(sprite()), &green_tint(), &mut readouts);
        surface.clear();
        assert!(surface.frame().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
