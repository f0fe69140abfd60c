//! # 2D Camera and Follow Strategies
//!
//! [`Camera2d`] is plain state: a world-space `target`, a screen-space
//! `offset`, rotation, and zoom. Projection is the affine
//! `translate(offset) · rotate · scale(zoom) · translate(-target)` — a point
//! at `target` always lands on `offset`.
//!
//! The follow strategies are pure functions
//! `(camera, followed position, viewport, world bounds, delta) → camera`.
//! They never touch entity state, which is what makes each of them a
//! ten-line unit test instead of a scene fixture.

use crate::math::{Affine2, Vec2};

/// Scroll-wheel zoom applied per notch.
pub const ZOOM_STEP: f32 = 0.05;
/// Lower zoom clamp.
pub const ZOOM_MIN: f32 = 0.1;
/// Upper zoom clamp.
pub const ZOOM_MAX: f32 = 3.0;

/// Below this distance the smooth follow stops moving, so the camera does
/// not jitter around a resting target.
const SMOOTH_MIN_DISTANCE: f32 = 10.0;
/// Smooth-follow approach speed, in units per second.
const SMOOTH_SPEED: f32 = 4.0;
/// Fraction of the viewport kept as deadzone margin on each axis by the
/// bounds-push strategy.
const PUSH_MARGIN: f32 = 0.2;

/// 2D camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2d {
    /// World-space point the camera looks at.
    pub target: Vec2,
    /// Screen-space point `target` projects to.
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera2d {
    /// Camera centered on `center` (both target and offset), zoom 1.
    pub fn centered(center: Vec2) -> Self {
        Self {
            target: center,
            offset: center,
            rotation: 0.0,
            zoom: 1.0,
        }
    }

    fn matrix(&self) -> Affine2 {
        Affine2::from_translation(self.offset)
            * Affine2::from_angle(self.rotation.to_radians())
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_translation(-self.target)
    }

    /// Project a world-space point to screen space.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.matrix().transform_point2(world)
    }

    /// Unproject a screen-space point to world space.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.matrix().inverse().transform_point2(screen)
    }
}

/// How the camera tracks its follow target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraFollow {
    /// Keep the target dead center. No bounds: the camera will happily show
    /// space outside the world.
    #[default]
    Center,
    /// Keep the target centered, but never scroll past the world bounds.
    InsideMap,
    /// Ease the camera toward the target instead of snapping.
    CenterSmooth,
    /// Stay put until the target leaves an inner deadzone, then push.
    BoundsPush,
}

impl CameraFollow {
    /// Compute the next camera state for this strategy.
    pub fn apply(
        self,
        camera: &Camera2d,
        followed: Vec2,
        viewport: Vec2,
        world: Vec2,
        delta: f32,
    ) -> Camera2d {
        match self {
            CameraFollow::Center => follow_center(camera, followed, viewport),
            CameraFollow::InsideMap => follow_inside_map(camera, followed, viewport, world),
            CameraFollow::CenterSmooth => follow_center_smooth(camera, followed, viewport, delta),
            CameraFollow::BoundsPush => follow_bounds_push(camera, followed, viewport),
        }
    }
}

/// Target snaps to the followed position, offset to the viewport center.
pub fn follow_center(camera: &Camera2d, followed: Vec2, viewport: Vec2) -> Camera2d {
    Camera2d {
        target: followed,
        offset: viewport * 0.5,
        ..*camera
    }
}

/// Centered follow, with the offset nudged per axis so the projected world
/// corners never expose space beyond `[0, world]`.
pub fn follow_inside_map(
    camera: &Camera2d,
    followed: Vec2,
    viewport: Vec2,
    world: Vec2,
) -> Camera2d {
    let mut next = follow_center(camera, followed, viewport);

    let max = next.world_to_screen(world);
    let min = next.world_to_screen(Vec2::ZERO);

    // Far corner short of the far viewport edge: pin the world edge to it.
    if max.x < viewport.x {
        next.offset.x = viewport.x - (max.x - viewport.x * 0.5);
    }
    if max.y < viewport.y {
        next.offset.y = viewport.y - (max.y - viewport.y * 0.5);
    }
    // Near corner past the near viewport edge: pin the world origin to it.
    if min.x > 0.0 {
        next.offset.x = viewport.x * 0.5 - min.x;
    }
    if min.y > 0.0 {
        next.offset.y = viewport.y * 0.5 - min.y;
    }

    next
}

/// Eases the target toward the followed position.
///
/// Outside [`SMOOTH_MIN_DISTANCE`] the target moves toward the followed
/// position by at most `SMOOTH_SPEED * delta`, clamped to the remaining
/// distance so a single step never overshoots. Inside the threshold the
/// camera holds still.
pub fn follow_center_smooth(
    camera: &Camera2d,
    followed: Vec2,
    viewport: Vec2,
    delta: f32,
) -> Camera2d {
    let mut next = Camera2d {
        offset: viewport * 0.5,
        ..*camera
    };

    let diff = followed - next.target;
    let distance = diff.length();
    if distance > SMOOTH_MIN_DISTANCE {
        let step = (SMOOTH_SPEED * delta).min(distance);
        next.target += diff * (step / distance);
    }

    next
}

/// "Screen push" scrolling: the camera is stationary while the followed
/// position stays inside a deadzone rectangle inset [`PUSH_MARGIN`] of the
/// viewport on each axis, and is pushed along once the target exits it.
pub fn follow_bounds_push(camera: &Camera2d, followed: Vec2, viewport: Vec2) -> Camera2d {
    let near = (1.0 - PUSH_MARGIN) * 0.5 * viewport;
    let far = (1.0 + PUSH_MARGIN) * 0.5 * viewport;

    // Deadzone corners in world space, measured with the incoming camera.
    let zone_min = camera.screen_to_world(near);
    let zone_max = camera.screen_to_world(far);

    let mut next = Camera2d {
        offset: near,
        ..*camera
    };

    if followed.x < zone_min.x {
        next.target.x = followed.x;
    } else if followed.x > zone_max.x {
        next.target.x = zone_min.x + (followed.x - zone_max.x);
    }
    if followed.y < zone_min.y {
        next.target.y = followed.y;
    } else if followed.y > zone_max.y {
        next.target.y = zone_min.y + (followed.y - zone_max.y);
    }

    next
}
