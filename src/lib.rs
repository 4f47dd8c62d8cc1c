//! Canvas image-composition editor core.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! layered scene of images, text and rectangles, translates raw DOM input
//! events into scene mutations, keeps the undo/redo history, and renders the
//! viewport with rulers, guides and selection handles. The host JavaScript
//! layer wires DOM events to the engine and reacts to the returned
//! [`engine::Action`]s (redraws, panel refreshes, cursor changes, prompts).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Scene objects, layer order, selection and styles |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against objects and their handles |
//! | [`snap`] | Ruler guides and edge/center snapping |
//! | [`history`] | Snapshot undo/redo stack |
//! | [`render`] | Scene rendering against an abstract [`render::Surface`] |
//! | [`web`] | `Canvas2D` surface, text measurement, console logging |
//! | [`assets`] | Bitmap store, decoding and PNG data URLs |
//! | [`filters`] | Grayscale / sepia / invert pixel filters |
//! | [`project`] | JSON project save and load |
//! | [`config`] | Editor tunables |
//! | [`consts`] | Shared constants (colors, handle geometry, ruler size) |

pub mod assets;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod filters;
pub mod history;
pub mod hit;
pub mod input;
pub mod project;
pub mod render;
pub mod scene;
pub mod snap;
pub mod web;
