use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

/// Shared color palette for pie slices and legends.
pub const PALETTE: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
    Color::LightBlue,
    Color::LightGreen,
];

/// Color for a known activity category, falling back to the palette.
pub fn category_color(category: &str, index: usize) -> Color {
    match category {
        "work" => Color::Blue,
        "study" => Color::Green,
        "entertainment" => Color::Magenta,
        "other" => Color::DarkGray,
        _ => PALETTE[index % PALETTE.len()],
    }
}

/// `95` → `1h 35m`, `40` → `40m`.
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Cut `text` to at most `max` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_render_compactly() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(40), "40m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(95), "1h 35m");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("短文本", 5), "短文本");
        assert_eq!(truncate("整理周报和会议记录", 5), "整理周报…");
    }

    #[test]
    fn centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(40, 10, outer);
        assert_eq!((inner.x, inner.y, inner.width, inner.height), (30, 15, 40, 10));
    }
}
