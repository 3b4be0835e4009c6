//! Drag/resize geometry and surface clamping.
//!
//! Everything here is a pure function of the proposed geometry, the viewport and the config.
//! The manager decides when a proposal is committed.

use crate::{
    config::WindowManagerConfig,
    model::{PointerPosition, Position, Rect, ResizeEdge, Size, Viewport},
};

/// Raises each dimension to at least `min`.
pub fn clamp_size(size: Size, min: Size) -> Size {
    Size {
        width: size.width.max(min.width),
        height: size.height.max(min.height),
    }
}

/// Largest size that fits inside the margins and above the taskbar strip, never below the minimum.
pub fn max_size(viewport: Viewport, config: &WindowManagerConfig) -> Size {
    Size {
        width: (viewport.width - 2 * config.edge_margin).max(config.min_size.width),
        height: (viewport.height - config.taskbar_height - config.edge_margin)
            .max(config.min_size.height),
    }
}

/// Lowest y a window bottom may reach without covering the taskbar strip.
fn usable_bottom(viewport: Viewport, config: &WindowManagerConfig) -> i32 {
    viewport.height - config.taskbar_height
}

/// Fits a freshly created window on the surface.
///
/// Size is bounded by [`max_size`]; the origin keeps the margin on the left and top and keeps the
/// window clear of the right margin and the taskbar strip. When the surface is too small the
/// lower bound wins.
pub fn clamp_initial_placement(
    position: Position,
    size: Size,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> (Position, Size) {
    let max = max_size(viewport, config);
    let size = Size {
        width: size.width.min(max.width).max(config.min_size.width),
        height: size.height.min(max.height).max(config.min_size.height),
    };
    let max_x = viewport.width - config.edge_margin - size.width;
    let max_y = usable_bottom(viewport, config) - size.height;
    let position = Position {
        x: position.x.min(max_x).max(config.edge_margin),
        y: position.y.min(max_y).max(config.edge_margin),
    };
    (position, size)
}

/// Translates `origin` by the pointer travel since the drag started.
pub fn drag_position(
    origin: Position,
    pointer_start: PointerPosition,
    pointer: PointerPosition,
) -> Position {
    Position {
        x: origin.x + (pointer.x - pointer_start.x),
        y: origin.y + (pointer.y - pointer_start.y),
    }
}

/// Shrinks `size` so a window dropped at `position` stays inside the right margin and above the
/// taskbar strip. The position itself is never changed, and the size never drops below the minimum.
pub fn fit_size_after_drag(
    position: Position,
    size: Size,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> Size {
    let right_limit = viewport.width - config.edge_margin;
    let bottom_limit = usable_bottom(viewport, config);

    let width = if position.x + size.width > right_limit {
        right_limit - position.x
    } else {
        size.width
    };
    let height = if position.y + size.height > bottom_limit {
        bottom_limit - position.y
    } else {
        size.height
    };

    clamp_size(Size { width, height }, config.min_size)
}

/// Applies resize deltas for a given edge/corner drag.
pub fn resize_rect(start: Rect, edge: ResizeEdge, dx: i32, dy: i32) -> Rect {
    match edge {
        ResizeEdge::East => Rect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => Rect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => Rect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => Rect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => Rect {
            y: start.y + dy,
            h: start.h - dy,
            w: start.w + dx,
            ..start
        },
        ResizeEdge::NorthWest => Rect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => Rect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => Rect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}

/// Clamps a resize proposal to the minimum, the surface and the taskbar strip.
///
/// The edge opposite the grabbed handle stays anchored at its position in `start`, so a handle
/// pinned at its limit no longer drags the window along.
pub fn clamp_resize(
    start: Rect,
    proposed: Rect,
    edge: ResizeEdge,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> Rect {
    let min = config.min_size;
    let max = max_size(viewport, config);
    let bottom_limit = usable_bottom(viewport, config);

    let width_room = if edge.moves_left() {
        start.right()
    } else {
        viewport.width - start.x
    };
    let height_room = if edge.moves_top() {
        start.bottom()
    } else {
        bottom_limit - start.y
    };

    let w = proposed
        .w
        .min(max.width)
        .min(width_room.max(min.width))
        .max(min.width);
    let h = proposed
        .h
        .min(max.height)
        .min(height_room.max(min.height))
        .max(min.height);

    // The grabbed edge moves; the anchored origin only shifts when the far edge would overflow.
    let x = if edge.moves_left() {
        start.right() - w
    } else {
        start.x.min(viewport.width - w)
    };
    let y = if edge.moves_top() {
        start.bottom() - h
    } else {
        start.y.min(bottom_limit - h)
    };

    Rect { x, y, w, h }
}

/// Surface occupied by a maximized window.
pub fn maximized_rect(viewport: Viewport, config: &WindowManagerConfig) -> Rect {
    Rect {
        x: 0,
        y: 0,
        w: viewport.width.max(config.min_size.width),
        h: usable_bottom(viewport, config).max(config.min_size.height),
    }
}
