use std::f64::consts::FRAC_PI_2;

use image::RgbaImage;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::assets::{self, ImageStore};
use crate::camera::{Camera, Point, from_local_rotated};
use crate::config::{ConfigError, EditorConfig};
use crate::filters::Filter;
use crate::hit::{self, HandleMetrics, Hit, HitPart, ResizeAnchor};
use crate::history::History;
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::project::{self, ProjectError};
use crate::render::{self, FixedAdvance, TextMeasure, View};
use crate::scene::{Direction, FillKind, Font, LayerRow, ObjectKind, PropertyPanel, Scene, SceneObject, Shadow};
use crate::snap::{self, Axis, Guides};
use crate::web::{self, CanvasMeasure, WebSurface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Call [`Engine::render`] before the next event.
    RenderNeeded,
    /// Rebuild the layer panel from these rows (topmost first).
    LayersChanged(Vec<LayerRow>),
    /// Rebuild the property panel; `None` hides it.
    PropertiesChanged(Option<PropertyPanel>),
    SetCursor(String),
    /// Prompt for new text and answer with [`EngineCore::set_text`].
    EditTextRequested { index: usize, content: String },
    /// Show the context menu at this canvas position.
    ShowContextMenu { at: Point },
    HideContextMenu,
    /// A user-facing message, e.g. a failed image decode.
    Notice(String),
}

/// What a mutation touched. [`EngineCore::finish`] turns it into actions.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Record a history snapshot.
    pub commit: bool,
    pub redraw: bool,
    /// The layer list (names, order, visibility, selection) changed.
    pub layers: bool,
    /// The selection or its panel-visible properties changed.
    pub properties: bool,
}

impl Outcome {
    pub const NONE: Self = Self { commit: false, redraw: false, layers: false, properties: false };
    pub const REDRAW: Self = Self { redraw: true, ..Self::NONE };
    pub const SELECTION: Self = Self { redraw: true, layers: true, properties: true, ..Self::NONE };
    pub const COMMITTED: Self = Self { commit: true, ..Self::SELECTION };
}

/// Entries of the canvas context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextCommand {
    MoveForward,
    MoveBackward,
    Delete,
}

/// Core engine state: all logic that does not touch the canvas element.
/// [`Engine`] wraps it together with the browser surface.
pub struct EngineCore {
    config: EditorConfig,
    pub scene: Scene,
    pub images: ImageStore,
    pub camera: Camera,
    pub guides: Guides,
    pub ui: UiState,
    pub input: InputState,
    pub history: History,
    clipboard: Option<SceneObject>,
    measure: Box<dyn TextMeasure>,
    /// Full canvas width in pixels, rulers included.
    pub viewport_width: f64,
    /// Full canvas height in pixels, rulers included.
    pub viewport_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(EditorConfig::default(), Box::new(FixedAdvance::default()))
    }
}

impl EngineCore {
    /// An engine that sizes text with [`FixedAdvance`].
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_measure(config, Box::new(FixedAdvance::default()))
    }

    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn with_measure(config: EditorConfig, measure: Box<dyn TextMeasure>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, measure))
    }

    fn build(config: EditorConfig, measure: Box<dyn TextMeasure>) -> Self {
        let camera = Camera { zoom: config.clamped_initial_zoom(), ..Camera::default() };
        Self {
            config,
            scene: Scene::new(),
            images: ImageStore::new(),
            camera,
            guides: Guides::new(),
            ui: UiState::default(),
            input: InputState::default(),
            history: History::new(Vec::new()),
            clipboard: None,
            measure,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Update the canvas size in pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    // --- Post-mutation pipeline ---

    /// Translate an outcome into host actions: history commit first, then
    /// render, layer panel and property panel refreshes in that order.
    pub fn finish(&mut self, outcome: Outcome) -> Vec<Action> {
        let mut actions = Vec::new();
        if outcome.commit {
            self.history.commit(self.scene.objects().to_vec());
        }
        if outcome.redraw {
            actions.push(Action::RenderNeeded);
        }
        if outcome.layers {
            actions.push(Action::LayersChanged(self.scene.layers()));
        }
        if outcome.properties {
            actions.push(Action::PropertiesChanged(self.scene.property_panel()));
        }
        actions
    }

    // --- Coordinates ---

    /// Canvas pixels to viewport pixels (the area inside the rulers).
    fn screen_of(&self, canvas: Point) -> Point {
        Point::new(canvas.x - self.config.ruler_size, canvas.y - self.config.ruler_size)
    }

    fn world_of(&self, canvas: Point) -> Point {
        self.camera.screen_to_world(self.screen_of(canvas))
    }

    fn viewport_world_size(&self) -> (f64, f64) {
        let ruler = self.config.ruler_size;
        (
            self.camera.screen_dist_to_world((self.viewport_width - ruler).max(0.0)),
            self.camera.screen_dist_to_world((self.viewport_height - ruler).max(0.0)),
        )
    }

    fn viewport_center_world(&self) -> Point {
        let ruler = self.config.ruler_size;
        let screen = Point::new((self.viewport_width - ruler) / 2.0, (self.viewport_height - ruler) / 2.0);
        self.camera.screen_to_world(screen)
    }

    #[must_use]
    pub fn handle_metrics(&self) -> HandleMetrics {
        HandleMetrics { size: self.config.handle_size, rotate_offset: self.config.rotate_handle_offset }
    }

    fn snap_threshold(&self) -> f64 {
        self.camera.screen_dist_to_world(self.config.snap_threshold_px)
    }

    fn set_input(&mut self, next: InputState) {
        log::debug!("input: {} -> {}", self.input.name(), next.name());
        self.input = next;
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Vec<Action> {
        if self.ui.cursor == cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor(cursor.to_owned())]
    }

    fn notice(message: String) -> Vec<Action> {
        log::warn!("{message}");
        vec![Action::Notice(message)]
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, canvas: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.hide_context_menu();
        match button {
            Button::Secondary => {
                actions.extend(self.open_context_menu(canvas));
                return actions;
            }
            Button::Middle => return actions,
            Button::Primary => {}
        }
        let outcome = self.begin_gesture(canvas);
        actions.extend(self.finish(outcome));
        if matches!(self.input, InputState::Panning { .. }) {
            actions.extend(self.set_cursor("grabbing"));
        }
        actions
    }

    /// Pointer-down resolution: rulers, pan modifier, selected handles,
    /// bodies top-down, then empty space.
    fn begin_gesture(&mut self, canvas: Point) -> Outcome {
        let ruler = self.config.ruler_size;
        let world = self.world_of(canvas);
        let axis = match (canvas.y < ruler, canvas.x < ruler) {
            (false, false) => None,
            (true, false) => Some(Axis::Horizontal),
            (false, true) => Some(Axis::Vertical),
            (true, true) => return Outcome::NONE,
        };
        if let Some(axis) = axis {
            let value = match axis {
                Axis::Horizontal => world.y,
                Axis::Vertical => world.x,
            };
            let index = self.guides.push(axis, value);
            self.set_input(InputState::DraggingGuide { axis, index });
            return Outcome::REDRAW;
        }

        if self.ui.space_held {
            self.set_input(InputState::Panning { last_screen: self.screen_of(canvas) });
            return Outcome::NONE;
        }

        let before = self.scene.selected();
        match hit::hit_test(&self.scene, world, &self.handle_metrics()) {
            Some(Hit { index, part: HitPart::RotateHandle }) => self.set_input(InputState::Rotating { index }),
            Some(Hit { index, part: HitPart::ResizeHandle(anchor) }) => {
                self.set_input(InputState::Resizing { index, anchor });
            }
            Some(Hit { index, part: HitPart::Body }) => {
                self.scene.select(Some(index));
                self.set_input(InputState::Dragging { index, last_world: world });
            }
            None => {
                self.scene.select(None);
            }
        }
        if self.scene.selected() == before { Outcome::NONE } else { Outcome::SELECTION }
    }

    pub fn on_pointer_move(&mut self, canvas: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.world_of(canvas);
        let outcome = match self.input.clone() {
            InputState::Idle => return self.update_hover(world),
            InputState::Dragging { index, last_world } => {
                self.drag(index, world.x - last_world.x, world.y - last_world.y);
                self.input = InputState::Dragging { index, last_world: world };
                Outcome::REDRAW
            }
            InputState::Resizing { index, anchor } => {
                self.resize(index, anchor, world);
                Outcome::REDRAW
            }
            InputState::Rotating { index } => {
                if let Some(obj) = self.scene.get_mut(index) {
                    let center = obj.center();
                    obj.rotation = (world.y - center.y).atan2(world.x - center.x) + FRAC_PI_2;
                }
                Outcome::REDRAW
            }
            InputState::Panning { last_screen } => {
                let screen = self.screen_of(canvas);
                self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen };
                Outcome::REDRAW
            }
            InputState::DraggingGuide { axis, index } => {
                let value = match axis {
                    Axis::Horizontal => world.y,
                    Axis::Vertical => world.x,
                };
                self.guides.set(axis, index, value);
                Outcome::REDRAW
            }
        };
        self.finish(outcome)
    }

    pub fn on_pointer_up(&mut self, canvas: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let state = std::mem::take(&mut self.input);
        log::debug!("input: {} -> idle", state.name());
        let had_guides = self.ui.active_guides != snap::ActiveGuides::default();
        self.ui.active_guides.clear();

        let outcome = Outcome {
            commit: state.commits_on_release(),
            redraw: had_guides || !matches!(state, InputState::Idle),
            ..Outcome::NONE
        };
        let mut actions = self.finish(outcome);
        actions.extend(self.update_hover(self.world_of(canvas)));
        actions
    }

    pub fn on_wheel(&mut self, canvas: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let screen = self.screen_of(canvas);
        let cfg = &self.config;
        self.camera.zoom_at(screen, delta.dy < 0.0, cfg.zoom_step, cfg.zoom_min, cfg.zoom_max);
        self.finish(Outcome::REDRAW)
    }

    /// Request a text edit when double-clicking inside the selected text.
    pub fn on_double_click(&mut self, canvas: Point) -> Vec<Action> {
        let world = self.world_of(canvas);
        let Some(index) = self.scene.selected() else {
            return Vec::new();
        };
        let Some(obj) = self.scene.get(index) else {
            return Vec::new();
        };
        match &obj.kind {
            ObjectKind::Text { content, .. } if obj.contains(world) => {
                vec![Action::EditTextRequested { index, content: content.clone() }]
            }
            _ => Vec::new(),
        }
    }

    fn update_hover(&mut self, world: Point) -> Vec<Action> {
        let cursor = if self.ui.space_held {
            "grab"
        } else {
            hit::hover_cursor(&self.scene, world, &self.handle_metrics())
        };
        self.set_cursor(cursor)
    }

    fn drag(&mut self, index: usize, dx: f64, dy: f64) {
        let threshold = self.snap_threshold();
        let Some(obj) = self.scene.get_mut(index) else {
            return;
        };
        obj.x += dx;
        obj.y += dy;
        self.ui.active_guides = snap::snap_object(obj, &self.guides, threshold);
    }

    fn resize(&mut self, index: usize, anchor: ResizeAnchor, world: Point) {
        let threshold = self.snap_threshold();
        let limits = ResizeLimits { min_size: self.config.min_object_size, min_font: self.config.min_font_size };
        let Some(obj) = self.scene.get_mut(index) else {
            return;
        };
        resize_object(obj, anchor, world, limits, self.measure.as_ref());
        self.ui.active_guides = snap::snap_object(obj, &self.guides, threshold);
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            if self.ui.space_held {
                return Vec::new();
            }
            self.ui.space_held = true;
            return if matches!(self.input, InputState::Idle) { self.set_cursor("grab") } else { Vec::new() };
        }
        if modifiers.command() {
            return if key.is_letter('c') {
                self.copy()
            } else if key.is_letter('v') {
                self.paste()
            } else if key.is_letter('z') && modifiers.shift {
                self.redo()
            } else if key.is_letter('z') {
                self.undo()
            } else if key.is_letter('y') {
                self.redo()
            } else {
                Vec::new()
            };
        }
        if key.0 == "Delete" || key.0 == "Backspace" {
            return self.delete_selected();
        }
        if let Some((dx, dy)) = key.arrow() {
            let step = if modifiers.shift { self.config.nudge_large } else { self.config.nudge };
            if self.scene.nudge(dx * step, dy * step) {
                return self.finish(Outcome::REDRAW);
            }
        }
        Vec::new()
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if !key.is_space() {
            return Vec::new();
        }
        self.ui.space_held = false;
        if matches!(self.input, InputState::Panning { .. }) {
            self.set_input(InputState::Idle);
        }
        self.set_cursor("default")
    }

    // --- Clipboard / history ---

    /// Remember a copy of the selected object. Emits nothing.
    pub fn copy(&mut self) -> Vec<Action> {
        if let Some(obj) = self.scene.selected_object() {
            self.clipboard = Some(obj.clone());
        }
        Vec::new()
    }

    /// Insert the clipboard object, offset from the copied position.
    pub fn paste(&mut self) -> Vec<Action> {
        let Some(source) = self.clipboard.clone() else {
            return Vec::new();
        };
        self.scene.paste(&source, self.config.paste_offset);
        self.finish(Outcome::COMMITTED)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        match self.history.undo() {
            Some(objects) => self.restore_snapshot(objects),
            None => Vec::new(),
        }
    }

    pub fn redo(&mut self) -> Vec<Action> {
        match self.history.redo() {
            Some(objects) => self.restore_snapshot(objects),
            None => Vec::new(),
        }
    }

    fn restore_snapshot(&mut self, objects: Vec<SceneObject>) -> Vec<Action> {
        self.scene.replace(objects);
        self.set_input(InputState::Idle);
        self.ui.active_guides.clear();
        self.finish(Outcome::SELECTION)
    }

    // --- Scene commands ---

    /// Add the default rectangle centered in the viewport.
    pub fn add_rectangle(&mut self) -> Vec<Action> {
        let (w, h) = (self.config.default_rect_width, self.config.default_rect_height);
        let c = self.viewport_center_world();
        self.scene.add(SceneObject::new(ObjectKind::Rectangle, c.x - w / 2.0, c.y - h / 2.0, w, h));
        self.finish(Outcome::COMMITTED)
    }

    /// Add the default text centered in the viewport.
    pub fn add_text(&mut self) -> Vec<Action> {
        let font = Font::new(self.config.default_font_size, self.config.default_font_family.clone());
        let content = self.config.default_text.clone();
        let (w, h) = text_extent(self.measure.as_ref(), &content, &font);
        let c = self.viewport_center_world();
        self.scene.add(SceneObject::new(ObjectKind::Text { content, font }, c.x - w / 2.0, c.y - h / 2.0, w, h));
        self.finish(Outcome::COMMITTED)
    }

    /// Add a decoded bitmap as a new image layer, fitted to half the
    /// viewport and centered.
    pub fn add_image(&mut self, bitmap: RgbaImage) -> Vec<Action> {
        let (iw, ih) = bitmap.dimensions();
        if iw == 0 || ih == 0 {
            return Self::notice("Image has no pixels".to_owned());
        }
        let (w, h) = self.fit_to_viewport(f64::from(iw), f64::from(ih));
        let key = self.images.insert(bitmap);
        log::info!("image: inserted {key} ({iw}x{ih})");
        let c = self.viewport_center_world();
        let kind = ObjectKind::Image { current: key, original: key };
        self.scene.add(SceneObject::new(kind, c.x - w / 2.0, c.y - h / 2.0, w, h));
        self.finish(Outcome::COMMITTED)
    }

    /// Decode a user file and add it. Decode failures leave the scene alone.
    pub fn add_image_bytes(&mut self, bytes: &[u8]) -> Vec<Action> {
        match assets::decode(bytes) {
            Ok(bitmap) => self.add_image(bitmap),
            Err(e) => Self::notice(format!("Could not load image: {e}")),
        }
    }

    fn fit_to_viewport(&self, iw: f64, ih: f64) -> (f64, f64) {
        let (vw, vh) = self.viewport_world_size();
        if vw <= 0.0 || vh <= 0.0 {
            return (iw, ih);
        }
        let aspect = iw / ih;
        if aspect > vw / vh { (vw * 0.5, vw * 0.5 / aspect) } else { (vh * 0.5 * aspect, vh * 0.5) }
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.scene.selected() {
            Some(index) => self.delete_layer(index),
            None => Vec::new(),
        }
    }

    pub fn delete_layer(&mut self, index: usize) -> Vec<Action> {
        if self.scene.delete(index) {
            self.set_input(InputState::Idle);
            self.finish(Outcome::COMMITTED)
        } else {
            Vec::new()
        }
    }

    pub fn move_layer(&mut self, index: usize, direction: Direction) -> Vec<Action> {
        if self.scene.move_object(index, direction) {
            self.finish(Outcome::COMMITTED)
        } else {
            Vec::new()
        }
    }

    /// Select from the layer panel. Hidden layers cannot be selected.
    pub fn select_layer(&mut self, index: usize) -> Vec<Action> {
        if self.scene.select(Some(index)) {
            self.finish(Outcome::SELECTION)
        } else {
            Vec::new()
        }
    }

    pub fn toggle_visibility(&mut self, index: usize) -> Vec<Action> {
        if self.scene.toggle_visibility(index) {
            self.finish(Outcome::SELECTION)
        } else {
            Vec::new()
        }
    }

    /// Replace the content of the text object at `index`, keeping its
    /// horizontal center.
    pub fn set_text(&mut self, index: usize, text: String) -> Vec<Action> {
        let measure = self.measure.as_ref();
        let Some(obj) = self.scene.get_mut(index) else {
            return Vec::new();
        };
        let ObjectKind::Text { content, font } = &mut obj.kind else {
            return Vec::new();
        };
        if *content == text {
            return Vec::new();
        }
        *content = text;
        let (width, height) = text_extent(measure, content, font);
        obj.x += (obj.width - width) / 2.0;
        obj.width = width;
        obj.height = height;
        self.finish(Outcome::COMMITTED)
    }

    // --- Styles and filters ---

    pub fn set_fill_kind(&mut self, kind: FillKind) -> Vec<Action> {
        if self.scene.set_fill_kind(kind) { self.finish(Outcome::REDRAW) } else { Vec::new() }
    }

    /// Set the start color, or the gradient end color when `second` is set.
    pub fn set_fill_color(&mut self, second: bool, color: &str) -> Vec<Action> {
        if self.scene.set_fill_color(second, color) { self.finish(Outcome::REDRAW) } else { Vec::new() }
    }

    pub fn set_shadow(&mut self, shadow: Shadow) -> Vec<Action> {
        if self.scene.set_shadow(shadow) { self.finish(Outcome::REDRAW) } else { Vec::new() }
    }

    /// Replace the selected image's pixels with a filtered copy of its original.
    pub fn apply_filter(&mut self, filter: Filter) -> Vec<Action> {
        let Some(index) = self.scene.selected() else {
            return Vec::new();
        };
        let Some((_, original)) = self.scene.get(index).and_then(|o| o.image_keys()) else {
            return Vec::new();
        };
        let filtered = match self.images.require(original) {
            Ok(source) => filter.apply(source),
            Err(e) => return Self::notice(format!("Could not apply filter: {e}")),
        };
        let key = self.images.insert(filtered);
        if let Some(obj) = self.scene.get_mut(index)
            && let ObjectKind::Image { current, .. } = &mut obj.kind
        {
            *current = key;
        }
        log::info!("image: applied {filter:?} to object {index}");
        self.finish(Outcome::COMMITTED)
    }

    /// Point the selected image back at its original pixels.
    pub fn reset_filter(&mut self) -> Vec<Action> {
        let Some(obj) = self.scene.selected_object_mut() else {
            return Vec::new();
        };
        let ObjectKind::Image { current, original } = &mut obj.kind else {
            return Vec::new();
        };
        if *current == *original {
            return Vec::new();
        }
        *current = *original;
        self.finish(Outcome::COMMITTED)
    }

    // --- Context menu ---

    fn open_context_menu(&mut self, canvas: Point) -> Vec<Action> {
        let world = self.world_of(canvas);
        let Some(index) = hit::topmost_at(&self.scene, world) else {
            return Vec::new();
        };
        let mut actions = if self.scene.select(Some(index)) { self.finish(Outcome::SELECTION) } else { Vec::new() };
        self.ui.context_menu_open = true;
        actions.push(Action::ShowContextMenu { at: canvas });
        actions
    }

    fn hide_context_menu(&mut self) -> Vec<Action> {
        if !self.ui.context_menu_open {
            return Vec::new();
        }
        self.ui.context_menu_open = false;
        vec![Action::HideContextMenu]
    }

    /// Run a context-menu entry against the selection.
    pub fn context_menu_action(&mut self, command: ContextCommand) -> Vec<Action> {
        let mut actions = self.hide_context_menu();
        let Some(index) = self.scene.selected() else {
            return actions;
        };
        actions.extend(match command {
            ContextCommand::MoveForward => self.move_layer(index, Direction::Forward),
            ContextCommand::MoveBackward => self.move_layer(index, Direction::Backward),
            ContextCommand::Delete => self.delete_layer(index),
        });
        actions
    }

    // --- Projects ---

    /// Serialize the scene with embedded images.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] if an image fails to encode.
    pub fn save_project(&self) -> Result<String, ProjectError> {
        project::save(&self.scene, &self.images)
    }

    /// Replace the scene with a saved project. On any error the editor is
    /// left unchanged and a notice is emitted.
    pub fn load_project(&mut self, json: &str) -> Vec<Action> {
        let objects = match project::load(json, &mut self.images) {
            Ok(objects) => objects,
            Err(e) => return Self::notice(format!("Could not load project: {e}")),
        };
        self.scene.replace(objects);
        self.scene.restore_counter();
        self.history.reset(self.scene.objects().to_vec());
        self.set_input(InputState::Idle);
        self.ui.active_guides.clear();
        self.finish(Outcome::SELECTION)
    }

    // --- Queries ---

    /// Inputs for one render pass.
    #[must_use]
    pub fn view(&self, show_selection: bool) -> View<'_> {
        View {
            scene: &self.scene,
            images: &self.images,
            camera: &self.camera,
            guides: &self.guides,
            active_guides: self.ui.active_guides,
            handles: self.handle_metrics(),
            ruler_size: self.config.ruler_size,
            width: self.viewport_width,
            height: self.viewport_height,
            show_selection,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.scene.selected()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }
}

// =============================================================
// Geometry helpers
// =============================================================

/// Lower bounds applied while resizing.
#[derive(Debug, Clone, Copy)]
pub struct ResizeLimits {
    pub min_size: f64,
    pub min_font: f64,
}

/// Width and height of `content` set in `font`. Height is the font size.
fn text_extent(measure: &dyn TextMeasure, content: &str, font: &Font) -> (f64, f64) {
    (measure.text_width(content, font).max(1.0), font.size)
}

/// Move the `anchor` handle of `obj` to `world`, keeping the opposite edge
/// or corner fixed in the object's rotated frame.
///
/// Text scales its font instead of stretching: horizontal handles use the
/// width ratio, vertical-only handles the height ratio, and the box is then
/// re-measured. Only the font is floored for text, at `min_font`. Text that
/// measures to no width keeps its font under horizontal handles.
pub fn resize_object(
    obj: &mut SceneObject,
    anchor: ResizeAnchor,
    world: Point,
    limits: ResizeLimits,
    measure: &dyn TextMeasure,
) {
    let (sx, sy) = anchor.signs();
    let local = obj.to_local(world);
    let (old_w, old_h) = (obj.width, obj.height);
    let raw_w = if sx == 0.0 { old_w } else { sx.mul_add(local.x, old_w / 2.0) };
    let raw_h = if sy == 0.0 { old_h } else { sy.mul_add(local.y, old_h / 2.0) };

    let (new_w, new_h) = if let ObjectKind::Text { content, font } = &mut obj.kind {
        let scale = match (anchor.is_horizontal(), measure.text_width(content, font) > 0.0) {
            (false, _) => raw_h / old_h,
            (true, true) => raw_w / old_w,
            (true, false) => 1.0,
        };
        font.size = (font.size * scale).max(limits.min_font);
        text_extent(measure, content, font)
    } else {
        (raw_w.max(limits.min_size), raw_h.max(limits.min_size))
    };

    let shift = Point::new(sx * (new_w - old_w) / 2.0, sy * (new_h - old_h) / 2.0);
    let center = from_local_rotated(shift, obj.center(), obj.rotation);
    obj.width = new_w;
    obj.height = new_h;
    obj.x = center.x - new_w / 2.0;
    obj.y = center.y - new_h / 2.0;
}

/// The full editor. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    surface: WebSurface,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, sized to its current pixel size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` is invalid or the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Result<Self, JsValue> {
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let ctx = web::context_2d(&canvas)?;
        let mut core = EngineCore::build(config, Box::new(CanvasMeasure::new(ctx.clone())));
        core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, surface: WebSurface::new(ctx), core })
    }

    /// Resize the backing canvas and the engine viewport together.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.core.set_viewport(f64::from(width), f64::from(height));
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, canvas: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(canvas, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, canvas: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(canvas, modifiers)
    }

    pub fn on_pointer_up(&mut self, canvas: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(canvas, button, modifiers)
    }

    pub fn on_wheel(&mut self, canvas: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(canvas, delta, modifiers)
    }

    pub fn on_double_click(&mut self, canvas: Point) -> Vec<Action> {
        self.core.on_double_click(canvas)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        render::draw(&mut self.surface, &self.core.view(true))
    }

    /// Render without selection UI and capture the canvas as a PNG data URL.
    /// The normal view is redrawn afterwards.
    ///
    /// # Errors
    ///
    /// Returns `Err` if drawing or encoding fails.
    pub fn export_png(&mut self) -> Result<String, JsValue> {
        render::draw(&mut self.surface, &self.core.view(false))?;
        let url = self.canvas.to_data_url_with_type("image/png");
        self.render()?;
        url
    }
}
