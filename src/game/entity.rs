// Positioned, anchored game object with pluggable behavior

use crate::core::math::clamp;
use crate::core::Vector2;
use crate::engine::input::InputState;
use crate::engine::renderer::{Surface, TransformScope};

/// Fractional point inside the bounding box used as the logical origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub const TOP_LEFT: Self = Self { x: 0.0, y: 0.0 };
    pub const BOTTOM_CENTER: Self = Self { x: 0.5, y: 1.0 };

    /// Create an anchor, clamping both components into `[0, 1]`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp(x, 0.0, 1.0),
            y: clamp(y, 0.0, 1.0),
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// Geometry and motion state of an entity.
///
/// The scalar accessors read and write the same storage as the `position`
/// and `velocity` vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub width: f32,
    pub height: f32,
    pub position: Vector2,
    pub velocity: Vector2,
    pub anchor: Anchor,
    pub horizontal_flip: bool,
}

impl Body {
    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn vx(&self) -> f32 {
        self.velocity.x
    }

    pub fn set_vx(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn vy(&self) -> f32 {
        self.velocity.y
    }

    pub fn set_vy(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Left edge of the bounding box
    pub fn left(&self) -> f32 {
        self.position.x - self.anchor.x * self.width
    }

    /// Right edge of the bounding box
    pub fn right(&self) -> f32 {
        self.left() + self.width
    }

    /// Top-left corner snapped to whole pixels
    pub fn draw_origin(&self) -> (f32, f32) {
        (
            self.left().round(),
            (self.position.y - self.anchor.y * self.height).round(),
        )
    }
}

/// Per-entity logic plugged into an [`Entity`]
pub trait Behavior {
    /// Advance one tick of `dt` milliseconds
    fn update(&mut self, _body: &mut Body, _dt: f32, _input: &InputState) {}

    /// Draw in entity-local space: the origin is the bounding box's top-left
    fn render(&self, _body: &Body, _surface: &mut dyn Surface) {}
}

/// An entity with no behavior
impl Behavior for () {}

/// A positioned visual object driven by its [`Behavior`]
#[derive(Debug)]
pub struct Entity<B: Behavior = ()> {
    body: Body,
    behavior: B,
}

impl<B: Behavior> Entity<B> {
    /// Create an entity from position and velocity vectors
    pub fn new(width: f32, height: f32, position: Vector2, velocity: Vector2, behavior: B) -> Self {
        Self {
            body: Body {
                width,
                height,
                position,
                velocity,
                anchor: Anchor::default(),
                horizontal_flip: false,
            },
            behavior,
        }
    }

    /// Create a resting entity at `(x, y)`
    pub fn at(width: f32, height: f32, x: f32, y: f32, behavior: B) -> Self {
        Self::new(width, height, Vector2::new(x, y), Vector2::ZERO, behavior)
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.body.velocity = Vector2::new(vx, vy);
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.body.anchor = anchor;
        self
    }

    /// Run the behavior's update
    pub fn update(&mut self, dt: f32, input: &InputState) {
        self.behavior.update(&mut self.body, dt, input);
    }

    /// Draw the entity.
    ///
    /// Moves the origin to the anchored, pixel-snapped top-left corner,
    /// mirrors about the entity's width if `horizontal_flip` is set, then
    /// hands over to the behavior. The surface transform is restored on
    /// every exit path.
    pub fn render(&self, surface: &mut dyn Surface) {
        let mut scope = TransformScope::new(surface);

        let (x, y) = self.body.draw_origin();
        scope.translate(x, y);
        if self.body.horizontal_flip {
            scope.translate(self.body.width, 0.0);
            scope.scale(-1.0, 1.0);
        }

        self.behavior.render(&self.body, &mut *scope);
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::recording::{Call, RecordingSurface};
    use crate::engine::renderer::Rect;

    /// Moves by velocity and draws a filled box
    struct Drift;

    impl Behavior for Drift {
        fn update(&mut self, body: &mut Body, dt: f32, _input: &InputState) {
            let step = Vector2::new(body.vx() * dt, body.vy() * dt);
            body.position.add(step);
        }

        fn render(&self, body: &Body, surface: &mut dyn Surface) {
            surface.fill_rect(Rect::new(0.0, 0.0, body.width, body.height), [1, 2, 3, 255]);
        }
    }

    struct Exploding;

    impl Behavior for Exploding {
        fn render(&self, _body: &Body, _surface: &mut dyn Surface) {
            panic!("render failed");
        }
    }

    #[test]
    fn test_vector_and_scalar_constructors_agree() {
        let from_vectors =
            Entity::new(4.0, 2.0, Vector2::new(1.0, 2.0), Vector2::new(3.0, 4.0), ());
        let from_scalars = Entity::at(4.0, 2.0, 1.0, 2.0, ()).with_velocity(3.0, 4.0);
        assert_eq!(from_vectors.body(), from_scalars.body());
    }

    #[test]
    fn test_scalar_accessors_alias_vectors() {
        let mut entity = Entity::at(4.0, 2.0, 0.0, 0.0, ());
        entity.body_mut().set_x(7.0);
        assert_eq!(entity.body().position.x, 7.0);

        entity.body_mut().velocity.y = -3.0;
        assert_eq!(entity.body().vy(), -3.0);

        entity.body_mut().position.scale(2.0);
        assert_eq!(entity.body().x(), 14.0);
    }

    #[test]
    fn test_update_delegates_to_behavior() {
        let mut entity = Entity::at(4.0, 2.0, 0.0, 0.0, Drift).with_velocity(1.0, -0.5);
        entity.update(2.0, &InputState::new());
        assert_eq!(entity.body().position, Vector2::new(2.0, -1.0));
    }

    #[test]
    fn test_render_translates_to_anchored_origin() {
        let entity = Entity::at(10.0, 20.0, 50.3, 100.0, Drift).with_anchor(Anchor::BOTTOM_CENTER);
        let mut surface = RecordingSurface::default();
        entity.render(&mut surface);

        assert_eq!(
            surface.calls,
            vec![
                Call::Save,
                // round(50.3 - 5) = 45, round(100 - 20) = 80
                Call::Translate(45.0, 80.0),
                Call::FillRect(Rect::new(0.0, 0.0, 10.0, 20.0), [1, 2, 3, 255]),
                Call::Restore,
            ]
        );
    }

    #[test]
    fn test_render_flipped() {
        let mut entity = Entity::at(10.0, 20.0, 0.0, 0.0, ());
        entity.body_mut().horizontal_flip = true;
        let mut surface = RecordingSurface::default();
        entity.render(&mut surface);

        assert_eq!(
            surface.calls,
            vec![
                Call::Save,
                Call::Translate(0.0, 0.0),
                Call::Translate(10.0, 0.0),
                Call::Scale(-1.0, 1.0),
                Call::Restore,
            ]
        );
    }

    #[test]
    fn test_render_restores_after_panic() {
        let entity = Entity::at(1.0, 1.0, 0.0, 0.0, Exploding);
        let mut surface = RecordingSurface::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            entity.render(&mut surface);
        }));
        assert!(result.is_err());
        assert_eq!(surface.depth, 0);
    }

    #[test]
    fn test_anchor_is_clamped() {
        assert_eq!(Anchor::new(1.5, -0.2), Anchor::new(1.0, 0.0));
        assert_eq!(Anchor::default(), Anchor::TOP_LEFT);
    }

    #[test]
    fn test_edges() {
        let entity = Entity::at(10.0, 4.0, 20.0, 0.0, ()).with_anchor(Anchor::BOTTOM_CENTER);
        assert_eq!(entity.body().left(), 15.0);
        assert_eq!(entity.body().right(), 25.0);
    }
}
