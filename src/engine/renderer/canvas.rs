// Software canvas: a CPU framebuffer with an affine transform stack

use super::surface::{Color, Rect, Surface};
use crate::core::math::clamp;
use crate::engine::assets::ImageHandle;
use glam::{Affine2, Vec2};
use image::{Pixel, Rgba, RgbaImage};

/// CPU-side drawing target.
///
/// Sampling is nearest-neighbour so pixel art stays crisp; every drawn pixel
/// is alpha-blended over what is already in the framebuffer.
pub struct Canvas {
    framebuffer: RgbaImage,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: RgbaImage::new(width, height),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Fill the whole framebuffer, ignoring the current transform
    pub fn clear(&mut self, color: Color) {
        for pixel in self.framebuffer.pixels_mut() {
            *pixel = Rgba(color);
        }
    }

    pub fn framebuffer(&self) -> &RgbaImage {
        &self.framebuffer
    }

    /// Current transform from local to framebuffer coordinates
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Device-space pixel bounds covered by a local rectangle, clipped
    fn device_bounds(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let corners = [
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.x + rect.width, rect.y),
            Vec2::new(rect.x, rect.y + rect.height),
            Vec2::new(rect.x + rect.width, rect.y + rect.height),
        ]
        .map(|corner| self.transform.transform_point2(corner));

        let min = corners.iter().fold(Vec2::splat(f32::MAX), |acc, c| acc.min(*c));
        let max = corners.iter().fold(Vec2::splat(f32::MIN), |acc, c| acc.max(*c));

        let width = self.width() as f32;
        let height = self.height() as f32;
        let x0 = clamp(min.x.floor(), 0.0, width) as u32;
        let y0 = clamp(min.y.floor(), 0.0, height) as u32;
        let x1 = clamp(max.x.ceil(), 0.0, width) as u32;
        let y1 = clamp(max.y.ceil(), 0.0, height) as u32;

        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Visit every framebuffer pixel whose centre maps inside `rect`,
    /// handing the callback the local coordinate of that centre.
    fn rasterize(&mut self, rect: Rect, mut shade: impl FnMut(Vec2) -> Option<Color>) {
        let Some((x0, y0, x1, y1)) = self.device_bounds(rect) else {
            return;
        };
        let inverse = self.transform.inverse();

        for py in y0..y1 {
            for px in x0..x1 {
                let local = inverse.transform_point2(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                if !rect.contains(local.x, local.y) {
                    continue;
                }
                if let Some(color) = shade(local) {
                    // Source-over
                    self.framebuffer.get_pixel_mut(px, py).blend(&Rgba(color));
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, like a 2D canvas context
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform = self.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform = self.transform * Affine2::from_scale(Vec2::new(x, y));
    }

    fn draw_image(&mut self, image: &ImageHandle, src: Rect, dst: Rect) {
        if dst.width <= 0.0 || dst.height <= 0.0 {
            return;
        }
        let pixels = image.pixels();
        let (max_x, max_y) = (pixels.width() as f32 - 1.0, pixels.height() as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }

        self.rasterize(dst, |local| {
            let u = src.x + (local.x - dst.x) / dst.width * src.width;
            let v = src.y + (local.y - dst.y) / dst.height * src.height;
            let sx = clamp(u.floor(), 0.0, max_x) as u32;
            let sy = clamp(v.floor(), 0.0, max_y) as u32;
            Some(pixels.get_pixel(sx, sy).0)
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rasterize(rect, |_| Some(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];
    const BLUE: Color = [0, 0, 255, 255];

    /// 4x1 strip: two red pixels then two blue ones
    fn two_tone() -> ImageHandle {
        let mut img = RgbaImage::new(4, 1);
        for x in 0..4 {
            img.put_pixel(x, 0, Rgba(if x < 2 { RED } else { BLUE }));
        }
        ImageHandle::from_rgba("two-tone", img)
    }

    #[test]
    fn test_fill_rect_with_translation() {
        let mut canvas = Canvas::new(8, 8);
        canvas.translate(2.0, 3.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 1.0), RED);

        assert_eq!(canvas.framebuffer().get_pixel(2, 3).0, RED);
        assert_eq!(canvas.framebuffer().get_pixel(3, 3).0, RED);
        assert_eq!(canvas.framebuffer().get_pixel(4, 3).0, [0, 0, 0, 0]);
        assert_eq!(canvas.framebuffer().get_pixel(2, 4).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_save_restore_transform() {
        let mut canvas = Canvas::new(4, 4);
        canvas.save();
        canvas.translate(1.0, 1.0);
        canvas.scale(-1.0, 1.0);
        canvas.restore();
        assert_eq!(canvas.transform(), Affine2::IDENTITY);

        // Extra restore is harmless
        canvas.restore();
        assert_eq!(canvas.transform(), Affine2::IDENTITY);
    }

    #[test]
    fn test_draw_image_subregion() {
        let mut canvas = Canvas::new(4, 1);
        // Draw only the blue half, stretched over two pixels at the left
        canvas.draw_image(
            &two_tone(),
            Rect::new(2.0, 0.0, 2.0, 1.0),
            Rect::new(0.0, 0.0, 2.0, 1.0),
        );
        assert_eq!(canvas.framebuffer().get_pixel(0, 0).0, BLUE);
        assert_eq!(canvas.framebuffer().get_pixel(1, 0).0, BLUE);
        assert_eq!(canvas.framebuffer().get_pixel(2, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_mirrored_draw() {
        let mut canvas = Canvas::new(4, 1);
        canvas.translate(4.0, 0.0);
        canvas.scale(-1.0, 1.0);
        canvas.draw_image(
            &two_tone(),
            Rect::new(0.0, 0.0, 4.0, 1.0),
            Rect::new(0.0, 0.0, 4.0, 1.0),
        );
        assert_eq!(canvas.framebuffer().get_pixel(0, 0).0, BLUE);
        assert_eq!(canvas.framebuffer().get_pixel(3, 0).0, RED);
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut canvas = Canvas::new(2, 2);
        canvas.translate(-10.0, -10.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), RED);
        assert!(canvas.framebuffer().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_translucent_blend() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [255, 255, 255, 0]);
        assert_eq!(canvas.framebuffer().get_pixel(0, 0).0, [0, 0, 0, 255]);

        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [255, 255, 255, 128]);
        let pixel = canvas.framebuffer().get_pixel(0, 0).0;
        assert!(pixel[0] > 120 && pixel[0] < 135);
        assert!(pixel[3] >= 254);
    }

    #[test]
    fn test_opaque_fill_replaces_translucent_pixel() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear([0, 0, 255, 64]);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        assert_eq!(canvas.framebuffer().get_pixel(0, 0).0, RED);
    }

    #[test]
    fn test_translucent_fill_over_transparent_pixel() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [255, 0, 0, 128]);
        let pixel = canvas.framebuffer().get_pixel(0, 0).0;
        // Over nothing the source color survives unpremultiplied
        assert_eq!(pixel[0], 255);
        assert!((127..=128).contains(&pixel[3]));
    }
}
