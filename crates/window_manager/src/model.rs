//! Window records, geometry primitives and pointer-interaction sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-chosen identifier of an open window, unique while the window is open.
///
/// The desktop shell uses `appId-timestamp` so several instances of one app can coexist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    /// Wraps a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Top-left window origin in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset from the left edge of the surface.
    pub x: i32,
    /// Vertical offset from the top edge of the surface.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Visible surface reported by the host, taskbar strip included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Surface width in pixels.
    pub width: i32,
    /// Surface height in pixels.
    pub height: i32,
}

impl Viewport {
    /// Creates a viewport.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Position and size of a window taken together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Builds a rect from a window origin and size.
    pub fn from_parts(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.width,
            h: size.height,
        }
    }

    /// Returns the origin.
    pub fn position(self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Returns the dimensions.
    pub fn size(self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Right edge (exclusive).
    pub fn right(self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

/// Transient lifecycle marker, at most one per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Window was just created.
    Opening,
    /// Window is fading out; its record is removed when the timer fires.
    Closing,
    /// Window is collapsing into the taskbar.
    Minimizing,
    /// Window is coming back from the taskbar.
    Reopening,
}

impl Transition {
    /// Stable lowercase name used for presentation hooks.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Minimizing => "minimizing",
            Self::Reopening => "reopening",
        }
    }
}

/// One open window. `content` is stored and forwarded but never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord<C> {
    /// Window identifier.
    pub id: WindowId,
    /// Title bar text.
    pub title: String,
    /// Opaque app content handle.
    pub content: C,
    /// Committed origin, preserved while maximized.
    pub position: Position,
    /// Committed size, preserved while maximized.
    pub size: Size,
    /// Whether the window fills the surface above the taskbar strip.
    pub is_maximized: bool,
    /// Whether the window is hidden from rendering.
    pub is_minimized: bool,
    /// Committed stacking value.
    pub z_index: u32,
    /// Whether the window holds focus.
    pub is_active: bool,
    /// Transient lifecycle marker mirrored from the sequencer.
    pub transition: Option<Transition>,
}

impl<C> WindowRecord<C> {
    /// Returns `true` while the closing animation is pending.
    pub fn is_closing(&self) -> bool {
        self.transition == Some(Transition::Closing)
    }

    /// Committed geometry as a rect.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// Optional placement supplied with an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpenOptions {
    /// Explicit origin; cascades from the open-window count when absent.
    pub position: Option<Position>,
    /// Explicit size; the configured default when absent.
    pub size: Option<Size>,
    /// Start maximized.
    pub is_maximized: bool,
}

/// Request to open a window, the sole entry point for new windows.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindowRequest<C> {
    /// Identifier for the new window.
    pub id: WindowId,
    /// Title bar text.
    pub title: String,
    /// Opaque content handle.
    pub content: C,
    /// Placement options.
    pub options: OpenOptions,
}

impl<C> OpenWindowRequest<C> {
    /// Creates a request with default placement.
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            options: OpenOptions::default(),
        }
    }

    /// Sets an explicit origin.
    pub fn with_position(mut self, position: Position) -> Self {
        self.options.position = Some(position);
        self
    }

    /// Sets an explicit size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.options.size = Some(size);
        self
    }

    /// Opens the window maximized.
    pub fn maximized(mut self) -> Self {
        self.options.is_maximized = true;
        self
    }
}

/// Effective geometry a renderer should draw for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFrame {
    /// Rendered rect: the maximized surface, the live drag rect or the committed rect.
    pub rect: Rect,
    /// Rendered stacking value, elevated during drag/resize.
    pub z_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Pointer coordinates in screen pixels.
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl PointerPosition {
    /// Creates a pointer position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Edge or corner grabbed by a resize handle.
pub enum ResizeEdge {
    /// Top edge.
    North,
    /// Bottom edge.
    South,
    /// Right edge.
    East,
    /// Left edge.
    West,
    /// Top-right corner.
    NorthEast,
    /// Top-left corner.
    NorthWest,
    /// Bottom-right corner.
    SouthEast,
    /// Bottom-left corner.
    SouthWest,
}

impl ResizeEdge {
    /// Returns `true` when dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// Returns `true` when dragging this handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }
}

/// In-flight header drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Window being dragged.
    pub window_id: WindowId,
    /// Pointer position at drag start.
    pub pointer_start: PointerPosition,
    /// Committed origin at drag start.
    pub origin_start: Position,
    /// Uncommitted origin following the pointer.
    pub live_position: Position,
}

/// In-flight edge/corner resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    /// Window being resized.
    pub window_id: WindowId,
    /// Grabbed edge or corner.
    pub edge: ResizeEdge,
    /// Pointer position at resize start.
    pub pointer_start: PointerPosition,
    /// Committed rect at resize start.
    pub rect_start: Rect,
}

/// The single active pointer interaction; drag and resize exclude each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Header drag.
    Drag(DragSession),
    /// Edge/corner resize.
    Resize(ResizeSession),
}

impl Interaction {
    /// Window targeted by the interaction.
    pub fn window_id(&self) -> &WindowId {
        match self {
            Self::Drag(session) => &session.window_id,
            Self::Resize(session) => &session.window_id,
        }
    }
}
