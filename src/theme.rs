use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so a future palette can
// swap colors in one place without touching components.

// Formsheet chrome
pub fn sheet_bg() -> Color {
    Color::Black
}
pub fn sheet_fg() -> Color {
    Color::White
}
pub fn sheet_border() -> Color {
    Color::DarkGray
}
pub fn sheet_border_focused() -> Color {
    Color::Cyan
}

// Host/demo surface
pub fn host_bg() -> Color {
    Color::Reset
}
pub fn host_fg() -> Color {
    Color::Gray
}

// Status / footer line
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::Black
}
