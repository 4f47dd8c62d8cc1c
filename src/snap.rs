//! Ruler guides and snapping of object bounds onto them.
//!
//! Guides live in world units. Snapping compares the unrotated bounding box
//! edges and center against every guide; the first guide (in creation order)
//! within the threshold wins on each axis, and that guide is reported as
//! active so the renderer can highlight it.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::scene::SceneObject;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A horizontal line at some world y, created from the top ruler.
    Horizontal,
    /// A vertical line at some world x, created from the left ruler.
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guides {
    /// World x positions.
    pub vertical: Vec<f64>,
    /// World y positions.
    pub horizontal: Vec<f64>,
}

impl Guides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn on_mut(&mut self, axis: Axis) -> &mut Vec<f64> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Append a guide and return its index on that axis.
    pub fn push(&mut self, axis: Axis, value: f64) -> usize {
        let list = self.on_mut(axis);
        list.push(value);
        list.len() - 1
    }

    /// Move an existing guide. Returns false for an unknown index.
    pub fn set(&mut self, axis: Axis, index: usize, value: f64) -> bool {
        match self.on_mut(axis).get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Guides that captured the last snap, at most one per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveGuides {
    pub vertical: Option<usize>,
    pub horizontal: Option<usize>,
}

impl ActiveGuides {
    #[must_use]
    pub fn is_active(&self, axis: Axis, index: usize) -> bool {
        let slot = match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        };
        slot == Some(index)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Shift `obj` onto nearby guides. `threshold` is in world units and a
/// distance must be strictly below it to snap.
pub fn snap_object<K>(obj: &mut SceneObject<K>, guides: &Guides, threshold: f64) -> ActiveGuides {
    let mut active = ActiveGuides::default();
    if let Some((index, delta)) = snap_axis(obj.y, obj.height, &guides.horizontal, threshold) {
        obj.y += delta;
        active.horizontal = Some(index);
    }
    if let Some((index, delta)) = snap_axis(obj.x, obj.width, &guides.vertical, threshold) {
        obj.x += delta;
        active.vertical = Some(index);
    }
    active
}

/// First guide within `threshold` of the start, middle, or end of the span,
/// with the delta that lands the matching point on it.
fn snap_axis(start: f64, size: f64, guides: &[f64], threshold: f64) -> Option<(usize, f64)> {
    let points = [start, start + size / 2.0, start + size];
    guides.iter().enumerate().find_map(|(index, &guide)| {
        points.iter().find(|&&p| (p - guide).abs() < threshold).map(|&p| (index, guide - p))
    })
}
