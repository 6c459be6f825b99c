//! Shared constants for the toggle binder.

// ── Class names ─────────────────────────────────────────────────

/// Class the board puts on thread images that may be expanded.
pub const DEFAULT_MARKER_CLASS: &str = "toggle-image";

/// Class added to an element while it is expanded.
pub const DEFAULT_EXPANDED_CLASS: &str = "expanded";

// ── DOM events ──────────────────────────────────────────────────

/// Event that triggers a toggle.
pub const CLICK_EVENT: &str = "click";

/// Event fired once the document has been fully parsed.
pub const READY_EVENT: &str = "DOMContentLoaded";
