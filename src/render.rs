//! Rendering: draws rulers, guides, scene objects and selection UI onto a
//! [`Surface`].
//!
//! The render pass only reads state. It never mutates the scene, the camera
//! or the guides; callers rebuild a [`View`] and redraw after every visual
//! change. The browser implementation of [`Surface`] lives in
//! [`crate::web`]; tests drive the same code through a recording double.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::FRAC_PI_2;

use image::RgbaImage;

use crate::assets::{ImageKey, ImageStore};
use crate::camera::{Camera, Point};
use crate::consts::{
    EMPTY_HINT_COLOR, EMPTY_HINT_FONT, EMPTY_HINT_TEXT, GUIDE_ACTIVE_COLOR, GUIDE_COLOR, RULER_BASE_SPACING,
    RULER_CORNER_FILL, RULER_FILL, RULER_FONT, RULER_STROKE, RULER_TICK_PX, ROTATE_HANDLE_FILL, SELECTION_COLOR,
    SELECTION_DASH,
};
use crate::hit::{HandleMetrics, ResizeAnchor};
use crate::scene::{Fill, FillKind, Font, ObjectKind, Scene, SceneObject, Shadow};
use crate::snap::{ActiveGuides, Axis, Guides};

/// A fill style: flat color or a two-stop linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint<'a> {
    Solid(&'a str),
    Linear { from: Point, to: Point, start: &'a str, end: &'a str },
}

/// Font and alignment for [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    /// CSS `textAlign` value.
    pub align: &'a str,
    /// CSS `textBaseline` value.
    pub baseline: &'a str,
}

/// The drawing-context collaborator. Mirrors the subset of the 2D canvas
/// API the editor needs; transforms and styles are stacked by
/// [`save`](Surface::save) / [`restore`](Surface::restore).
pub trait Surface {
    type Error;

    fn save(&mut self);
    fn restore(&mut self);
    /// Reset the transform and clear `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform reset.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform.
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform.
    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), Self::Error>;
    /// # Errors
    ///
    /// Returns `Err` if a gradient color stop is rejected.
    fn set_fill(&mut self, paint: &Paint<'_>) -> Result<(), Self::Error>;
    fn set_stroke(&mut self, color: &str, width: f64);
    /// # Errors
    ///
    /// Returns `Err` if the dash pattern is rejected.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Self::Error>;
    fn set_shadow(&mut self, shadow: &Shadow);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Stroke a straight segment with the current stroke style.
    fn line(&mut self, from: Point, to: Point);
    /// Fill and stroke a circle with the current styles.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the arc is rejected (e.g. negative radius).
    fn circle(&mut self, center: Point, radius: f64) -> Result<(), Self::Error>;
    /// # Errors
    ///
    /// Returns `Err` if the backend fails to draw the text.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> Result<(), Self::Error>;
    /// Draw `image` scaled into the given rectangle. `key` identifies the
    /// bitmap so backends can cache their upload.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot upload or draw the bitmap.
    fn draw_image(
        &mut self,
        key: ImageKey,
        image: &RgbaImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), Self::Error>;
}

/// Measures rendered text width, used to size text objects.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &Font) -> f64;
}

/// Fixed-advance measurer: every character is `ratio * font size` wide.
/// Used off-browser, where no font metrics exist.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub ratio: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size * self.ratio
    }
}

/// Read-only inputs of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub scene: &'a Scene,
    pub images: &'a ImageStore,
    pub camera: &'a Camera,
    pub guides: &'a Guides,
    pub active_guides: ActiveGuides,
    pub handles: HandleMetrics,
    pub ruler_size: f64,
    /// Full canvas width in pixels, rulers included.
    pub width: f64,
    /// Full canvas height in pixels, rulers included.
    pub height: f64,
    /// Draw the selection box and handles. Off for exports.
    pub show_selection: bool,
}

/// World-unit spacing between ruler ticks at `zoom`.
#[must_use]
pub fn tick_spacing(zoom: f64) -> f64 {
    if zoom > 5.0 {
        RULER_BASE_SPACING / 10.0
    } else if zoom > 2.0 {
        RULER_BASE_SPACING / 5.0
    } else if zoom > 0.5 {
        RULER_BASE_SPACING / 2.0
    } else if zoom > 0.25 {
        RULER_BASE_SPACING
    } else {
        RULER_BASE_SPACING * 2.0
    }
}

/// Draw a full frame.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw<S: Surface>(surface: &mut S, view: &View<'_>) -> Result<(), S::Error> {
    surface.clear(view.width, view.height)?;
    draw_rulers(surface, view)?;

    let camera = view.camera;
    surface.save();
    surface.translate(view.ruler_size, view.ruler_size)?;
    surface.translate(camera.pan_x, camera.pan_y)?;
    surface.scale(camera.zoom, camera.zoom)?;

    draw_guides(surface, view);
    for obj in view.scene.objects().iter().filter(|o| o.is_visible) {
        draw_object(surface, obj, view.images)?;
    }
    if view.show_selection
        && let Some(obj) = view.scene.selected_object()
    {
        draw_selection(surface, obj, &view.handles, camera.zoom)?;
    }
    surface.restore();

    if view.scene.is_empty() {
        surface.set_fill(&Paint::Solid(EMPTY_HINT_COLOR))?;
        let at = Point::new((view.width + view.ruler_size) / 2.0, (view.height + view.ruler_size) / 2.0);
        let style = TextStyle { font: EMPTY_HINT_FONT, align: "center", baseline: "middle" };
        surface.fill_text(EMPTY_HINT_TEXT, at, &style)?;
    }
    Ok(())
}

// =============================================================
// Rulers and guides
// =============================================================

fn draw_rulers<S: Surface>(surface: &mut S, view: &View<'_>) -> Result<(), S::Error> {
    let ruler = view.ruler_size;
    let camera = view.camera;
    let spacing = tick_spacing(camera.zoom);
    let label = TextStyle { font: RULER_FONT, align: "center", baseline: "middle" };

    surface.save();
    surface.set_stroke(RULER_STROKE, 1.0);

    surface.set_fill(&Paint::Solid(RULER_FILL))?;
    surface.fill_rect(0.0, 0.0, view.width, ruler);
    surface.fill_rect(0.0, 0.0, ruler, view.height);

    surface.set_fill(&Paint::Solid(RULER_STROKE))?;
    for (value, canvas_x) in ticks(camera.pan_x, camera.zoom, spacing, ruler, view.width) {
        surface.line(Point::new(canvas_x, ruler), Point::new(canvas_x, ruler - RULER_TICK_PX));
        surface.fill_text(&value.to_string(), Point::new(canvas_x, ruler / 2.0), &label)?;
    }
    for (value, canvas_y) in ticks(camera.pan_y, camera.zoom, spacing, ruler, view.height) {
        surface.line(Point::new(ruler, canvas_y), Point::new(ruler - RULER_TICK_PX, canvas_y));
        surface.save();
        surface.translate(ruler / 2.0, canvas_y)?;
        surface.rotate(-FRAC_PI_2)?;
        surface.fill_text(&value.to_string(), Point::new(0.0, 0.0), &label)?;
        surface.restore();
    }

    surface.set_fill(&Paint::Solid(RULER_CORNER_FILL))?;
    surface.fill_rect(0.0, 0.0, ruler, ruler);
    surface.restore();
    Ok(())
}

/// Tick values along one ruler with their canvas coordinate, starting at
/// the first multiple of `spacing` at or left of the viewport origin and
/// skipping ticks hidden under the corner square.
fn ticks(pan: f64, zoom: f64, spacing: f64, ruler: f64, extent: f64) -> impl Iterator<Item = (f64, f64)> {
    // `+ 0.0` normalizes a negative zero start so the label reads "0".
    let start = (-pan / zoom / spacing).floor() * spacing + 0.0;
    (0_u32..)
        .map(move |i| start + f64::from(i) * spacing)
        .map(move |value| (value, ruler + value * zoom + pan))
        .take_while(move |&(_, pos)| pos < extent)
        .filter(move |&(_, pos)| pos >= ruler)
}

fn draw_guides<S: Surface>(surface: &mut S, view: &View<'_>) {
    let camera = view.camera;
    let top_left = camera.screen_to_world(Point::new(0.0, 0.0));
    let bottom_right = camera.screen_to_world(Point::new(view.width, view.height));
    let width = 1.0 / camera.zoom;

    for (index, &x) in view.guides.vertical.iter().enumerate() {
        surface.set_stroke(guide_color(&view.active_guides, Axis::Vertical, index), width);
        surface.line(Point::new(x, top_left.y), Point::new(x, bottom_right.y));
    }
    for (index, &y) in view.guides.horizontal.iter().enumerate() {
        surface.set_stroke(guide_color(&view.active_guides, Axis::Horizontal, index), width);
        surface.line(Point::new(top_left.x, y), Point::new(bottom_right.x, y));
    }
}

fn guide_color(active: &ActiveGuides, axis: Axis, index: usize) -> &'static str {
    if active.is_active(axis, index) { GUIDE_ACTIVE_COLOR } else { GUIDE_COLOR }
}

// =============================================================
// Objects
// =============================================================

fn draw_object<S: Surface>(surface: &mut S, obj: &SceneObject, images: &ImageStore) -> Result<(), S::Error> {
    let (w, h) = (obj.width, obj.height);
    surface.save();
    if obj.shadow.enabled {
        surface.set_shadow(&obj.shadow);
    }
    translate_and_rotate(surface, obj)?;

    match &obj.kind {
        ObjectKind::Image { current, .. } => {
            // Missing bitmaps are skipped.
            if let Some(bitmap) = images.get(*current) {
                surface.draw_image(*current, bitmap, -w / 2.0, -h / 2.0, w, h)?;
            }
        }
        ObjectKind::Rectangle => {
            surface.set_fill(&fill_paint(&obj.fill, w))?;
            surface.fill_rect(-w / 2.0, -h / 2.0, w, h);
        }
        ObjectKind::Text { content, font } => {
            surface.set_fill(&fill_paint(&obj.fill, w))?;
            let font = font.to_string();
            let style = TextStyle { font: &font, align: "center", baseline: "middle" };
            surface.fill_text(content, Point::new(0.0, 0.0), &style)?;
        }
    }
    surface.restore();
    Ok(())
}

/// Paint for an object fill in its center-origin frame. Gradients run left
/// to right across the object's width.
fn fill_paint(fill: &Fill, width: f64) -> Paint<'_> {
    match fill.kind {
        FillKind::Solid => Paint::Solid(&fill.color1),
        FillKind::Linear => Paint::Linear {
            from: Point::new(-width / 2.0, 0.0),
            to: Point::new(width / 2.0, 0.0),
            start: &fill.color1,
            end: fill.end_color(),
        },
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection<S: Surface>(
    surface: &mut S,
    obj: &SceneObject,
    handles: &HandleMetrics,
    zoom: f64,
) -> Result<(), S::Error> {
    let (w, h) = (obj.width, obj.height);
    let line_width = 1.0 / zoom;
    surface.save();
    translate_and_rotate(surface, obj)?;

    surface.set_stroke(SELECTION_COLOR, line_width);
    surface.set_line_dash(&[SELECTION_DASH, SELECTION_DASH])?;
    surface.stroke_rect(-w / 2.0, -h / 2.0, w, h);
    surface.set_line_dash(&[])?;

    let size = handles.size;
    surface.set_fill(&Paint::Solid("white"))?;
    surface.set_stroke("black", line_width);
    for anchor in ResizeAnchor::ALL {
        let pos = anchor.local_position(w, h);
        surface.fill_rect(pos.x - size / 2.0, pos.y - size / 2.0, size, size);
        surface.stroke_rect(pos.x - size / 2.0, pos.y - size / 2.0, size, size);
    }

    let top = ResizeAnchor::N.local_position(w, h);
    let rot = handles.rotate_position(h);
    surface.set_stroke(SELECTION_COLOR, line_width);
    surface.line(top, rot);
    surface.set_fill(&Paint::Solid(ROTATE_HANDLE_FILL))?;
    surface.set_stroke("black", line_width);
    surface.circle(rot, handles.rotate_radius())?;

    surface.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the object's center and rotate by its rotation.
fn translate_and_rotate<S: Surface, K>(surface: &mut S, obj: &SceneObject<K>) -> Result<(), S::Error> {
    let center = obj.center();
    surface.translate(center.x, center.y)?;
    surface.rotate(obj.rotation)?;
    Ok(())
}
