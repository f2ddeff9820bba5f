use super::*;
use deskmem_api::timezone::{self, FormatOptions};

pub fn render_timeline_view(frame: &mut Frame, app: &App, body: Rect) {
    let timeline = &app.timeline;
    let page_count = timeline.page_count(app.page_size);

    let title = format!(
        " {} · page {}/{} · {} screenshot(s) ",
        timezone::iso_date(timeline.date),
        timeline.page + 1,
        page_count,
        timeline.total
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(title, Style::default().fg(Color::White)));

    let area = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0)])
        .split(body)[0];
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if timeline.screenshots.is_empty() {
        frame.render_widget(
            widgets::empty_state(timeline.error.as_deref(), "No screenshots on this day"),
            inner,
        );
        return;
    }

    let mut list_area = inner;
    if let Some(err) = &timeline.error {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(Paragraph::new(widgets::error_line(err)), rows[0]);
        list_area = rows[1];
    }

    let items: Vec<ListItem> = timeline
        .screenshots
        .iter()
        .map(|shot| {
            let mut spans = vec![
                Span::styled(
                    timezone::format(shot.timestamp, FormatOptions::time_only()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("  "),
                Span::styled(shot.filename.clone(), Style::default().fg(Color::White)),
            ];
            if shot.is_analyzed {
                spans.push(Span::styled(" ✓ analyzed", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::styled(" pending", Style::default().fg(Color::DarkGray)));
            }
            if shot.is_similar {
                spans.push(Span::styled(" (similar)", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(timeline.selected));
    frame.render_stateful_widget(list, list_area, &mut state);
}
