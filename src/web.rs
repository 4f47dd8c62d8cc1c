//! Browser backend: the `Canvas2D` [`Surface`], DOM text measurement and
//! console logging.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use image::RgbaImage;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::assets::ImageKey;
use crate::camera::Point;
use crate::render::{FixedAdvance, Paint, Surface, TextMeasure, TextStyle};
use crate::scene::{Font, Shadow};

/// Route `log` records to the browser console.
///
/// # Errors
///
/// Returns `Err` if a logger is already installed.
pub fn init_logging(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_log::init_with_level(level)
}

/// The 2D context of `canvas`.
///
/// # Errors
///
/// Returns `Err` if the canvas refuses a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Copy `image` into a detached canvas so it can be drawn scaled.
fn upload(image: &RgbaImage) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(image.width());
    canvas.set_height(image.height());
    let pixels = Clamped(image.as_raw().as_slice());
    let data = ImageData::new_with_u8_clamped_array_and_sh(pixels, image.width(), image.height())?;
    context_2d(&canvas)?.put_image_data(&data, 0.0, 0.0)?;
    Ok(canvas)
}

/// [`Surface`] over a `CanvasRenderingContext2d`.
///
/// Bitmaps are uploaded to offscreen canvases on first draw and cached by
/// [`ImageKey`]; keys are never reused for different pixels.
pub struct WebSurface {
    ctx: CanvasRenderingContext2d,
    uploads: HashMap<ImageKey, HtmlCanvasElement>,
}

impl WebSurface {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx, uploads: HashMap::new() }
    }
}

impl Surface for WebSurface {
    type Error = JsValue;

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.translate(x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        self.ctx.rotate(radians)
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), JsValue> {
        self.ctx.scale(sx, sy)
    }

    fn set_fill(&mut self, paint: &Paint<'_>) -> Result<(), JsValue> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(color),
            Paint::Linear { from, to, start, end } => {
                let gradient = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                gradient.add_color_stop(0.0, start)?;
                gradient.add_color_stop(1.0, end)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }

    fn set_stroke(&mut self, color: &str, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), JsValue> {
        let dash_array = js_sys::Array::new();
        for &segment in segments {
            dash_array.push(&segment.into());
        }
        self.ctx.set_line_dash(&dash_array)
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        self.ctx.set_shadow_color(&shadow.color);
        self.ctx.set_shadow_blur(shadow.blur);
        self.ctx.set_shadow_offset_x(shadow.offset_x);
        self.ctx.set_shadow_offset_y(shadow.offset_y);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn circle(&mut self, center: Point, radius: f64) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)?;
        self.ctx.fill();
        self.ctx.stroke();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> Result<(), JsValue> {
        self.ctx.set_font(style.font);
        self.ctx.set_text_align(style.align);
        self.ctx.set_text_baseline(style.baseline);
        self.ctx.fill_text(text, at.x, at.y)
    }

    fn draw_image(
        &mut self,
        key: ImageKey,
        image: &RgbaImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        let source = match self.uploads.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(upload(image)?),
        };
        self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(source, x, y, width, height)
    }
}

/// [`TextMeasure`] backed by `CanvasRenderingContext2d::measure_text`.
pub struct CanvasMeasure {
    ctx: CanvasRenderingContext2d,
}

impl CanvasMeasure {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for CanvasMeasure {
    fn text_width(&self, text: &str, font: &Font) -> f64 {
        self.ctx.save();
        self.ctx.set_font(&font.to_string());
        let width = match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log::warn!("measure_text failed for {font}: {e:?}");
                FixedAdvance::default().text_width(text, font)
            }
        };
        self.ctx.restore();
        width
    }
}
