use std::ops::Range;

use crate::domain::entities::user::UserStatus;

pub const ROW_HEIGHT_PX: f64 = 56.0;
pub const ROW_OVERSCAN: usize = 8;

pub fn near_scroll_bottom(
    scroll_top: f64,
    scroll_height: f64,
    client_height: f64,
    threshold: f64,
) -> bool {
    scroll_height - (scroll_top + client_height) <= threshold
}

/// Rows to render for a fixed-height list scrolled to `scroll_top`.
pub fn visible_window(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    total: usize,
    overscan: usize,
) -> Range<usize> {
    if total == 0 || row_height <= 0.0 {
        return 0..0;
    }
    let first = (scroll_top.max(0.0) / row_height).floor() as usize;
    let shown = (viewport_height.max(0.0) / row_height).ceil() as usize;
    let start = first.saturating_sub(overscan).min(total);
    let end = first
        .saturating_add(shown)
        .saturating_add(overscan)
        .min(total);
    start..end.max(start)
}

pub fn status_color(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "#2e7d32",
        UserStatus::Away => "#f9a825",
        UserStatus::Offline => "#9e9e9e",
    }
}

pub fn root_container_style() -> &'static str {
    "display: flex; flex-direction: column; height: 100vh; padding: 12px; box-sizing: border-box; font-family: sans-serif;"
}

pub fn list_container_style() -> &'static str {
    "flex: 1; overflow: auto; border: 1px solid #ddd; border-radius: 8px; position: relative;"
}

pub fn row_style(selected: bool) -> String {
    let background = if selected { "#eef4ff" } else { "#fff" };
    format!(
        "display: flex; align-items: center; gap: 10px; height: {ROW_HEIGHT_PX}px; padding: 0 10px; box-sizing: border-box; border-bottom: 1px solid #f0f0f0; cursor: pointer; background: {background};"
    )
}
