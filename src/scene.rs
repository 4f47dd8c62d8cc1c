//! Scene model: drawable objects, their style properties, and the ordered
//! list that owns them.
//!
//! List position is paint order: index 0 is drawn first (bottommost). The
//! scene also owns the selection and the id counter, so every mutation that
//! shifts indices reconciles the selection in the same place.
//!
//! Objects serialize with camelCase field names and a `type` tag, which is
//! the layout the project file uses (see [`crate::project`]).

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assets::ImageKey;
use crate::camera::{Point, to_local_rotated};
use crate::consts::{DEFAULT_FILL, DEFAULT_GRADIENT_END};

/// Session-unique object identifier, assigned from a monotonic counter.
pub type ObjectId = u64;

// =============================================================
// Style properties
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillKind {
    #[default]
    Solid,
    /// Two-stop gradient running left to right across the object.
    Linear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    #[serde(rename = "type")]
    pub kind: FillKind,
    pub color1: String,
    /// End color of a linear fill. Falls back to `color1` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color2: Option<String>,
}

impl Default for Fill {
    fn default() -> Self {
        Self { kind: FillKind::Solid, color1: DEFAULT_FILL.to_owned(), color2: None }
    }
}

impl Fill {
    /// End color of the gradient, or the start color for solid fills.
    #[must_use]
    pub fn end_color(&self) -> &str {
        self.color2.as_deref().unwrap_or(&self.color1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub enabled: bool,
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self { enabled: false, color: "#000000".to_owned(), blur: 5.0, offset_x: 5.0, offset_y: 5.0 }
    }
}

/// Font descriptor stored as the CSS shorthand `"<size>px <family>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Font {
    pub size: f64,
    pub family: String,
}

impl Font {
    #[must_use]
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self { size, family: family.into() }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid font {0:?}: expected \"<size>px <family>\"")]
pub struct FontParseError(String);

impl FromStr for Font {
    type Err = FontParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FontParseError(s.to_owned());
        let (size, family) = s.trim().split_once("px").ok_or_else(bad)?;
        let size: f64 = size.trim().parse().map_err(|_| bad())?;
        let family = family.trim();
        if size <= 0.0 || family.is_empty() {
            return Err(bad());
        }
        Ok(Self::new(size, family))
    }
}

impl From<Font> for String {
    fn from(font: Font) -> Self {
        font.to_string()
    }
}

impl TryFrom<String> for Font {
    type Error = FontParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================
// Objects
// =============================================================

/// Variant-specific payload of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// Bitmap layer. Filters replace `current`; `original` is the decoded source.
    Image { current: ImageKey, original: ImageKey },
    /// Single-line text. Width and height are measured from `content` in `font`.
    Text { content: String, font: Font },
    Rectangle,
}

impl ObjectKind {
    /// Prefix used for generated display names.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image { .. } => "Layer",
            Self::Text { .. } => "Text",
            Self::Rectangle => "Rectangle",
        }
    }
}

/// A drawable entity. `K` is the variant payload; the live scene uses
/// [`ObjectKind`] and the project file swaps in an embedded-pixels payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject<K = ObjectKind> {
    pub id: ObjectId,
    pub display_name: String,
    /// World-space left edge of the unrotated bounding box.
    pub x: f64,
    /// World-space top edge of the unrotated bounding box.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in radians about the bounding-box center.
    pub rotation: f64,
    pub is_visible: bool,
    #[serde(default)]
    pub fill: Fill,
    #[serde(default)]
    pub shadow: Shadow,
    #[serde(flatten)]
    pub kind: K,
}

impl<K> SceneObject<K> {
    /// World-space center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Express a world point in this object's unrotated, center-origin frame.
    #[must_use]
    pub fn to_local(&self, world: Point) -> Point {
        to_local_rotated(world, self.center(), self.rotation)
    }

    /// Whether a local-frame point lies inside the unrotated bounding box.
    #[must_use]
    pub fn contains_local(&self, local: Point) -> bool {
        local.x.abs() <= self.width / 2.0 && local.y.abs() <= self.height / 2.0
    }

    /// Whether a world point lies inside the rotated bounding box.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        self.contains_local(self.to_local(world))
    }

    /// Copy the common fields onto a different payload.
    #[must_use]
    pub fn with_kind<T>(&self, kind: T) -> SceneObject<T> {
        SceneObject {
            id: self.id,
            display_name: self.display_name.clone(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            is_visible: self.is_visible,
            fill: self.fill.clone(),
            shadow: self.shadow.clone(),
            kind,
        }
    }
}

impl SceneObject {
    /// A visible, unrotated object with default style. The id and display
    /// name are filled in by [`Scene::add`].
    #[must_use]
    pub fn new(kind: ObjectKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: 0,
            display_name: String::new(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            is_visible: true,
            fill: Fill::default(),
            shadow: Shadow::default(),
            kind,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text { .. })
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self.kind, ObjectKind::Image { .. })
    }

    /// Image keys referenced by this object, current first.
    #[must_use]
    pub fn image_keys(&self) -> Option<(ImageKey, ImageKey)> {
        match self.kind {
            ObjectKind::Image { current, original } => Some((current, original)),
            ObjectKind::Text { .. } | ObjectKind::Rectangle => None,
        }
    }
}

// =============================================================
// Scene
// =============================================================

/// Reorder direction. `Forward` moves toward the top of the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self, index: usize) -> Option<usize> {
        match self {
            Self::Forward => index.checked_add(1),
            Self::Backward => index.checked_sub(1),
        }
    }
}

/// One row of the layer panel, topmost object first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct LayerRow {
    pub index: usize,
    pub display_name: String,
    pub is_visible: bool,
    pub is_selected: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// What the property panel should show for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPanel {
    /// Image objects expose filter buttons.
    pub show_filters: bool,
    /// Text and rectangles expose the fill editor.
    pub show_fill: bool,
    pub fill: Fill,
    pub shadow: Shadow,
}

/// Ordered owner of all scene objects plus selection and id counter.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected: Option<usize>,
    next_id: ObjectId,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// Index of the selected object, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.and_then(|i| self.objects.get(i))
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        self.selected.and_then(|i| self.objects.get_mut(i))
    }

    /// The id the next added object will receive.
    #[must_use]
    pub fn next_id(&self) -> ObjectId {
        self.next_id
    }

    /// Append an object, assign it a fresh id (and a generated name when it
    /// has none), and select it. Returns the new index.
    pub fn add(&mut self, mut obj: SceneObject) -> usize {
        obj.id = self.next_id;
        self.next_id += 1;
        if obj.display_name.is_empty() {
            obj.display_name = format!("{} {}", obj.kind.label(), obj.id);
        }
        self.objects.push(obj);
        let index = self.objects.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Add a copy of `source` shifted by `offset` on both axes.
    pub fn paste(&mut self, source: &SceneObject, offset: f64) -> usize {
        let mut copy = source.clone();
        copy.x += offset;
        copy.y += offset;
        copy.display_name.clear();
        self.add(copy)
    }

    /// Remove the object at `index`. Out-of-range indices are ignored.
    pub fn delete(&mut self, index: usize) -> bool {
        if index >= self.objects.len() {
            return false;
        }
        self.objects.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        true
    }

    /// Swap the object at `index` with its neighbor in `direction`. The
    /// selection follows whichever of the two objects it was on.
    pub fn move_object(&mut self, index: usize, direction: Direction) -> bool {
        let Some(target) = direction.step(index) else {
            return false;
        };
        if index >= self.objects.len() || target >= self.objects.len() {
            return false;
        }
        self.objects.swap(index, target);
        if self.selected == Some(index) {
            self.selected = Some(target);
        } else if self.selected == Some(target) {
            self.selected = Some(index);
        }
        true
    }

    /// Select the object at `index`, or clear with `None`. Hidden objects
    /// and out-of-range indices cannot be selected. Returns whether the
    /// selection changed.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let next = index.filter(|&i| self.objects.get(i).is_some_and(|o| o.is_visible));
        if index.is_some() && next.is_none() {
            return false;
        }
        let changed = self.selected != next;
        self.selected = next;
        changed
    }

    /// Flip visibility of the object at `index`. Hiding the selected object
    /// clears the selection.
    pub fn toggle_visibility(&mut self, index: usize) -> bool {
        let Some(obj) = self.objects.get_mut(index) else {
            return false;
        };
        obj.is_visible = !obj.is_visible;
        if !obj.is_visible && self.selected == Some(index) {
            self.selected = None;
        }
        true
    }

    /// Move the selected object by a world-space delta.
    pub fn nudge(&mut self, dx: f64, dy: f64) -> bool {
        let Some(obj) = self.selected_object_mut() else {
            return false;
        };
        obj.x += dx;
        obj.y += dy;
        true
    }

    /// Replace every object wholesale (undo, redo, project load). The
    /// selection is cleared; the id counter is left alone.
    pub fn replace(&mut self, objects: Vec<SceneObject>) {
        self.objects = objects;
        self.selected = None;
    }

    /// Reset the id counter to one past the largest id present.
    pub fn restore_counter(&mut self) {
        self.next_id = self.objects.iter().map(|o| o.id.saturating_add(1)).max().unwrap_or(0);
    }

    /// Topmost-first rows for the layer panel.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerRow> {
        let last = self.objects.len().saturating_sub(1);
        self.objects
            .iter()
            .enumerate()
            .rev()
            .map(|(index, obj)| LayerRow {
                index,
                display_name: obj.display_name.clone(),
                is_visible: obj.is_visible,
                is_selected: self.selected == Some(index),
                can_move_up: index < last,
                can_move_down: index > 0,
            })
            .collect()
    }

    /// Property panel contents, or `None` when nothing is selected.
    #[must_use]
    pub fn property_panel(&self) -> Option<PropertyPanel> {
        let obj = self.selected_object()?;
        Some(PropertyPanel {
            show_filters: obj.is_image(),
            show_fill: !obj.is_image(),
            fill: obj.fill.clone(),
            shadow: obj.shadow.clone(),
        })
    }

    /// Switch the selected object's fill kind. Moving to a gradient without
    /// an end color picks white.
    pub fn set_fill_kind(&mut self, kind: FillKind) -> bool {
        let Some(obj) = self.selected_object_mut() else {
            return false;
        };
        obj.fill.kind = kind;
        if kind == FillKind::Linear && obj.fill.color2.is_none() {
            obj.fill.color2 = Some(DEFAULT_GRADIENT_END.to_owned());
        }
        true
    }

    /// Set the start (`second == false`) or end color of the selected fill.
    pub fn set_fill_color(&mut self, second: bool, color: &str) -> bool {
        let Some(obj) = self.selected_object_mut() else {
            return false;
        };
        if second {
            obj.fill.color2 = Some(color.to_owned());
        } else {
            color.clone_into(&mut obj.fill.color1);
        }
        true
    }

    pub fn set_shadow(&mut self, shadow: Shadow) -> bool {
        let Some(obj) = self.selected_object_mut() else {
            return false;
        };
        obj.shadow = shadow;
        true
    }
}
