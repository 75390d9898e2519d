// Frame-strip sprite animation

use crate::engine::assets::{load_image, ImageHandle, LoadError};
use crate::engine::renderer::{Rect, Surface, TransformScope};
use std::path::Path;
use std::sync::Arc;

/// How far below the full duration a one-shot animation parks its clock
const ONE_SHOT_EPSILON_MS: f64 = 0.00001;

/// Errors raised while building an animation
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("Frame count must be at least 1, got {0}")]
    InvalidFrameCount(u32),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// How a frame strip is laid out and played back
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationOptions {
    /// Number of frames in the strip
    pub frames: u32,
    /// Empty border around the whole strip, in pixels
    pub gap: f32,
    /// Spacing between neighbouring frames, in pixels
    pub padding: f32,
    /// Playback rate
    pub fps: f32,
    /// Draw offset applied to every frame
    pub offset_x: f32,
    pub offset_y: f32,
    /// Hold on the last frame instead of looping
    pub once: bool,
}

impl AnimationOptions {
    /// Looping strip with a 1px gap and 1px padding
    pub fn looping(frames: u32, fps: f32) -> Self {
        Self {
            frames,
            gap: 1.0,
            padding: 1.0,
            fps,
            offset_x: 0.0,
            offset_y: 0.0,
            once: false,
        }
    }

    /// Strip that plays once and holds on its last frame
    pub fn one_shot(frames: u32, fps: f32) -> Self {
        Self {
            once: true,
            ..Self::looping(frames, fps)
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn with_spacing(mut self, gap: f32, padding: f32) -> Self {
        self.gap = gap;
        self.padding = padding;
        self
    }
}

/// An animation backed by a horizontal strip of equally sized frames
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    strip: Arc<ImageHandle>,
    frame_count: u32,
    gap: f32,
    frame_width: f32,
    frame_height: f32,
    fps: f32,
    offset_x: f32,
    offset_y: f32,
    once: bool,
    elapsed_ms: f64,
}

impl SpriteAnimation {
    /// Build an animation over an already loaded strip
    pub fn new(strip: Arc<ImageHandle>, options: AnimationOptions) -> Result<Self, SpriteError> {
        if options.frames < 1 {
            return Err(SpriteError::InvalidFrameCount(options.frames));
        }

        let frames = options.frames as f32;
        let frame_height = strip.height() as f32 - options.gap * 2.0;
        let frame_width = (strip.width() as f32
            - options.gap * 2.0
            - (frames - 1.0) * options.padding)
            / frames;

        Ok(Self {
            strip,
            frame_count: options.frames,
            gap: options.gap,
            frame_width,
            frame_height,
            fps: options.fps,
            offset_x: options.offset_x,
            offset_y: options.offset_y,
            once: options.once,
            elapsed_ms: 0.0,
        })
    }

    /// Load the strip at `path`, then build the animation
    pub fn from_source<P: AsRef<Path>>(
        path: P,
        options: AnimationOptions,
    ) -> Result<Self, SpriteError> {
        let strip = load_image(path)?;
        Self::new(strip, options)
    }

    /// Rewind to the first frame
    pub fn reset_time(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Advance playback by `delta_ms`.
    ///
    /// Looping animations wrap around; one-shot animations stop just short of
    /// the end so they keep showing the last frame.
    pub fn advance(&mut self, delta_ms: f32) {
        let full = self.full_duration_ms();
        if self.once {
            self.elapsed_ms = (full - ONE_SHOT_EPSILON_MS).min(self.elapsed_ms + delta_ms as f64);
        } else {
            self.elapsed_ms = (self.elapsed_ms + delta_ms as f64).rem_euclid(full);
        }
    }

    /// Index of the frame shown at the current playback time
    pub fn current_frame_index(&self) -> u32 {
        let index =
            (self.elapsed_ms / self.frame_duration_ms()).rem_euclid(self.frame_count as f64);
        // Guard the float edge where rem_euclid rounds up to frame_count
        (index.floor() as u32).min(self.frame_count - 1)
    }

    /// Region of the strip holding frame `index`
    pub fn source_rect(&self, index: u32) -> Rect {
        Rect::new(
            self.gap + (self.frame_width + self.gap) * index as f32,
            self.gap,
            self.frame_width,
            self.frame_height,
        )
    }

    /// Draw the current frame at the surface origin.
    ///
    /// With `flip` the frame is mirrored about its own width and the offset is
    /// applied inside the mirror, so the flipped image is the exact left-right
    /// reflection of the unflipped one.
    pub fn draw(&self, surface: &mut dyn Surface, flip: bool) {
        let mut scope = TransformScope::new(surface);

        if flip {
            scope.translate(self.frame_width, 0.0);
            scope.scale(-1.0, 1.0);
        }
        scope.translate(self.offset_x, self.offset_y);

        scope.draw_image(
            &self.strip,
            self.source_rect(self.current_frame_index()),
            Rect::new(0.0, 0.0, self.frame_width, self.frame_height),
        );
    }

    /// Duration of a single frame
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Duration of one pass over every frame
    pub fn full_duration_ms(&self) -> f64 {
        self.frame_duration_ms() * self.frame_count as f64
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Check if a one-shot animation has reached its last frame
    pub fn is_finished(&self) -> bool {
        self.once && self.current_frame_index() == self.frame_count - 1
    }
}
