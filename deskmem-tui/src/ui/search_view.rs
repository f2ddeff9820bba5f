use super::*;
use deskmem_api::models::{Relevance, SearchHit};
use deskmem_api::timezone::{self, FormatOptions};

pub fn render_search_view(frame: &mut Frame, app: &App, body: Rect) {
    let search = &app.search;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body);

    let input_style = if search.input_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(search.input.value.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_style)
                .title(Span::styled(" Search ", input_style)),
        );
    frame.render_widget(input, rows[0]);
    if search.input_focused {
        let (before, _) = search.input.split_at_cursor();
        frame.set_cursor_position((
            rows[0].x + 1 + before.chars().count() as u16,
            rows[0].y + 1,
        ));
    }

    let title = match &search.last_query {
        Some(q) => format!(" {} result(s) for \"{q}\" ", search.total),
        None => " Results ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(title, Style::default().fg(Color::White)));
    let inner = block.inner(rows[1]);
    frame.render_widget(block, rows[1]);

    if search.hits.is_empty() {
        let empty = if search.last_query.is_some() {
            "No matches"
        } else {
            "Type a query and press Enter"
        };
        frame.render_widget(widgets::empty_state(search.error.as_deref(), empty), inner);
        return;
    }

    let mut lines = Vec::new();
    if let Some(err) = &search.error {
        lines.push(widgets::error_line(err));
    }
    for (i, hit) in search.hits.iter().enumerate() {
        let selected = !search.input_focused && i == search.selected;
        lines.extend(hit_lines(hit, selected));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn hit_lines(hit: &SearchHit, selected: bool) -> Vec<Line<'static>> {
    let relevance_color = match hit.relevance {
        Relevance::Semantic => Color::Magenta,
        Relevance::Keyword => Color::Cyan,
    };
    let marker = if selected { "▶ " } else { "  " };
    let mut header = vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(
            timezone::format(hit.timestamp, FormatOptions::without_seconds()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            hit.relevance.label().to_string(),
            Style::default().fg(relevance_color),
        ),
    ];
    if let Some(score) = hit.score_percent() {
        header.push(Span::styled(
            format!(" {score}%"),
            Style::default().fg(relevance_color),
        ));
    }
    if let Some(kind) = &hit.activity_type {
        header.push(Span::styled(
            format!("  [{kind}]"),
            Style::default().fg(utils::category_color(kind, 0)),
        ));
    }
    if let Some(app_name) = &hit.application {
        header.push(Span::styled(
            format!("  {app_name}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    if hit.screenshot_path().is_some() {
        header.push(Span::styled(
            "  [screenshot]",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = if selected {
        Line::from(header).style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        Line::from(header)
    };
    vec![
        header,
        Line::from(Span::styled(
            format!("    {}", hit.description.clone().unwrap_or_default()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ]
}
