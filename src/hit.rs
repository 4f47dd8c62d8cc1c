#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::scene::{Scene, SceneObject};

/// Which part of an object was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    RotateHandle,
}

impl HitPart {
    /// CSS cursor shown while hovering this part.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Body => "move",
            Self::RotateHandle => "crosshair",
            Self::ResizeHandle(anchor) => anchor.cursor(),
        }
    }
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Handles in hit-test priority order: top row, middle row, bottom row.
    pub const ALL: [Self; 8] = [Self::Nw, Self::N, Self::Ne, Self::W, Self::E, Self::Sw, Self::S, Self::Se];

    /// Unit direction of the handle from the center: each component is -1, 0 or 1.
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, -1.0),
            Self::Ne => (1.0, -1.0),
            Self::E => (1.0, 0.0),
            Self::Se => (1.0, 1.0),
            Self::S => (0.0, 1.0),
            Self::Sw => (-1.0, 1.0),
            Self::W => (-1.0, 0.0),
            Self::Nw => (-1.0, -1.0),
        }
    }

    /// Whether dragging this handle changes the width.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self.signs().0 != 0.0
    }

    /// Handle center in the object's local, center-origin frame.
    #[must_use]
    pub fn local_position(self, width: f64, height: f64) -> Point {
        let (sx, sy) = self.signs();
        Point::new(sx * width / 2.0, sy * height / 2.0)
    }

    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub index: usize,
    pub part: HitPart,
}

/// Handle geometry in local object units.
#[derive(Debug, Clone, Copy)]
pub struct HandleMetrics {
    /// Side length of a square resize handle.
    pub size: f64,
    /// Distance from the top edge to the rotation handle center.
    pub rotate_offset: f64,
}

impl HandleMetrics {
    /// Radius of the round rotation handle, used for drawing and hit-testing.
    #[must_use]
    pub fn rotate_radius(&self) -> f64 {
        self.size / 1.5
    }

    /// Rotation handle center in the local frame of an object of `height`.
    #[must_use]
    pub fn rotate_position(&self, height: f64) -> Point {
        Point::new(0.0, -height / 2.0 - self.rotate_offset)
    }
}

/// Test the handles of `obj` at `world`: rotation handle first, then each
/// resize handle in [`ResizeAnchor::ALL`] order.
#[must_use]
pub fn hit_handles(obj: &SceneObject, world: Point, metrics: &HandleMetrics) -> Option<HitPart> {
    let local = obj.to_local(world);
    let rot = metrics.rotate_position(obj.height);
    if (local.x - rot.x).hypot(local.y - rot.y) <= metrics.rotate_radius() {
        return Some(HitPart::RotateHandle);
    }
    let half = metrics.size / 2.0;
    ResizeAnchor::ALL
        .into_iter()
        .find(|anchor| {
            let pos = anchor.local_position(obj.width, obj.height);
            (local.x - pos.x).abs() <= half && (local.y - pos.y).abs() <= half
        })
        .map(HitPart::ResizeHandle)
}

/// Index of the topmost visible object containing `world`.
#[must_use]
pub fn topmost_at(scene: &Scene, world: Point) -> Option<usize> {
    scene.objects().iter().rposition(|obj| obj.is_visible && obj.contains(world))
}

/// Full pointer-down resolution against the scene: handles of the selected
/// visible object win over any body, then bodies are scanned top-down.
#[must_use]
pub fn hit_test(scene: &Scene, world: Point, metrics: &HandleMetrics) -> Option<Hit> {
    if let Some(index) = scene.selected()
        && let Some(obj) = scene.get(index).filter(|o| o.is_visible)
        && let Some(part) = hit_handles(obj, world, metrics)
    {
        return Some(Hit { index, part });
    }
    topmost_at(scene, world).map(|index| Hit { index, part: HitPart::Body })
}

/// Cursor for an idle pointer hovering at `world`. Only the selected object
/// gives feedback.
#[must_use]
pub fn hover_cursor(scene: &Scene, world: Point, metrics: &HandleMetrics) -> &'static str {
    let Some(obj) = scene.selected_object().filter(|o| o.is_visible) else {
        return "default";
    };
    if let Some(part) = hit_handles(obj, world, metrics) {
        return part.cursor();
    }
    if obj.contains(world) { HitPart::Body.cursor() } else { "default" }
}
