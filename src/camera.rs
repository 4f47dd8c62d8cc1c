#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in screen, world, or object-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom over the scene.
///
/// `pan_x` / `pan_y` are in screen pixels and are applied after scaling:
/// `screen = world * zoom + pan`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (viewport pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (viewport pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Translate the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Step the zoom by `step` in the direction of `zoom_in`, clamped to
    /// `[min, max]`, keeping the world point under `screen` fixed. An
    /// inverted range settles on `max`.
    pub fn zoom_at(&mut self, screen: Point, zoom_in: bool, step: f64, min: f64, max: f64) {
        let before = self.screen_to_world(screen);
        let direction: f64 = if zoom_in { 1.0 } else { -1.0 };
        self.zoom = (self.zoom * direction.mul_add(step, 1.0)).max(min).min(max);
        let after = self.screen_to_world(screen);
        self.pan_x += (after.x - before.x) * self.zoom;
        self.pan_y += (after.y - before.y) * self.zoom;
    }
}

/// Express `world` in the unrotated frame of an object centered at `center`
/// and rotated by `rotation` radians.
#[must_use]
pub fn to_local_rotated(world: Point, center: Point, rotation: f64) -> Point {
    let dx = world.x - center.x;
    let dy = world.y - center.y;
    let (sin, cos) = (-rotation).sin_cos();
    Point {
        x: dx * cos - dy * sin,
        y: dx * sin + dy * cos,
    }
}

/// Inverse of [`to_local_rotated`]: map a local point back to world space.
#[must_use]
pub fn from_local_rotated(local: Point, center: Point, rotation: f64) -> Point {
    let (sin, cos) = rotation.sin_cos();
    Point {
        x: center.x + local.x * cos - local.y * sin,
        y: center.y + local.x * sin + local.y * cos,
    }
}
