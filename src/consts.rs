//! Shared constants for the editor crate.

// ── Handles ─────────────────────────────────────────────────────

/// Side length of a square resize handle, in local object units.
pub const HANDLE_SIZE: f64 = 8.0;

/// Distance from the top edge midpoint to the rotation handle, in local units.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

// ── Viewport chrome ─────────────────────────────────────────────

/// Thickness of the top and left rulers in canvas pixels.
pub const RULER_SIZE: f64 = 30.0;

/// Length of a ruler tick mark in canvas pixels.
pub const RULER_TICK_PX: f64 = 5.0;

/// Tick spacing in world units at 100% zoom.
pub const RULER_BASE_SPACING: f64 = 100.0;

/// Selection dash segment length in local units.
pub const SELECTION_DASH: f64 = 4.0;

// ── Colors ──────────────────────────────────────────────────────

pub const RULER_FILL: &str = "#f0f0f0";
pub const RULER_CORNER_FILL: &str = "#e0e0e0";
pub const RULER_STROKE: &str = "#999";
pub const RULER_FONT: &str = "10px Arial";
pub const GUIDE_COLOR: &str = "rgba(0, 183, 255, 0.7)";
pub const GUIDE_ACTIVE_COLOR: &str = "rgba(255, 0, 0, 1)";
pub const SELECTION_COLOR: &str = "rgba(0, 0, 0, 0.7)";
pub const ROTATE_HANDLE_FILL: &str = "#28a745";
pub const DEFAULT_FILL: &str = "#495057";
pub const DEFAULT_GRADIENT_END: &str = "#ffffff";
pub const EMPTY_HINT_COLOR: &str = "#555";
pub const EMPTY_HINT_FONT: &str = "24px sans-serif";
pub const EMPTY_HINT_TEXT: &str = "Click to load an image.";
