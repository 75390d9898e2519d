// Drawing surface abstraction with canvas-style scoped transforms

use crate::engine::assets::ImageHandle;
use std::ops::{Deref, DerefMut};

/// RGBA8 color
pub type Color = [u8; 4];

/// Axis-aligned rectangle in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point lies inside (right/bottom edges exclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Something 2D can be drawn onto.
///
/// Transform calls compose onto the current transform, so the most recent
/// call applies first to drawn geometry. `save`/`restore` push and pop the
/// full transform state.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);

    /// Draw the `src` region of `image` into the `dst` rectangle
    fn draw_image(&mut self, image: &ImageHandle, src: Rect, dst: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Saves the surface state on creation and restores it on drop.
///
/// The restore runs on every exit path, including an unwinding panic from a
/// render callback.
pub struct TransformScope<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> TransformScope<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<'a> Deref for TransformScope<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for TransformScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! A surface that records calls instead of drawing, for geometry tests.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Save,
        Restore,
        Translate(f32, f32),
        Scale(f32, f32),
        DrawImage { path: String, src: Rect, dst: Rect },
        FillRect(Rect, Color),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
        pub depth: i32,
    }

    impl RecordingSurface {
        pub fn draws(&self) -> Vec<(Rect, Rect)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::DrawImage { src, dst, .. } => Some((*src, *dst)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn save(&mut self) {
            self.depth += 1;
            self.calls.push(Call::Save);
        }

        fn restore(&mut self) {
            self.depth -= 1;
            self.calls.push(Call::Restore);
        }

        fn translate(&mut self, x: f32, y: f32) {
            self.calls.push(Call::Translate(x, y));
        }

        fn scale(&mut self, x: f32, y: f32) {
            self.calls.push(Call::Scale(x, y));
        }

        fn draw_image(&mut self, image: &ImageHandle, src: Rect, dst: Rect) {
            self.calls.push(Call::DrawImage {
                path: image.path().to_string(),
                src,
                dst,
            });
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(Call::FillRect(rect, color));
        }
    }
}
