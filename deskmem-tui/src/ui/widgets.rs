use super::*;

pub fn render_header(frame: &mut Frame, area: Rect, app: &mut App, route: Route) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14)])
        .split(area);

    let titles: Vec<Line> = Route::MAIN
        .iter()
        .enumerate()
        .map(|(i, r)| Line::from(format!("{} {}", i + 1, r.title())))
        .collect();
    let selected = Route::MAIN.iter().position(|r| *r == route).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Desktop Memory ",
                    Style::default().fg(Color::Yellow),
                )),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, cols[0]);

    let inner = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let throbber_area = inner.inner(cols[1]);
    frame.render_widget(inner, cols[1]);

    let loading = app.is_loading();
    let throbber = throbber_widgets_tui::Throbber::default()
        .label(if loading { "loading" } else { "idle" })
        .style(Style::default().fg(Color::DarkGray))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
}

/// Bottom line: the status message if there is one, otherwise key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, route: Route) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Cyan),
        )),
        None => key_hints(app, route),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn key_hints(app: &App, route: Route) -> Line<'static> {
    let mut hints: Vec<(&str, &str)> = match route {
        Route::Dashboard => vec![("t", "Analyze now"), ("R", "Retry failed")],
        Route::Timeline => vec![
            ("←/→", "Page"),
            ("[/]", "Day"),
            ("T", "Today"),
            ("j/k", "Select"),
            ("Enter", "Open"),
        ],
        Route::Reports => vec![("Space", "Hourly/Daily"), ("[/]", "Day")],
        Route::Search if app.search.input_focused => vec![("Enter", "Search"), ("Esc", "Done")],
        Route::Search => vec![("/", "Edit query"), ("j/k", "Select"), ("Enter", "Open")],
        Route::Login => vec![],
    };
    if !app.is_typing() {
        hints.extend([("1-4", "Views"), ("r", "Reload")]);
        if app.can_logout() {
            hints.push(("L", "Log out"));
        }
        hints.push(("q", "Quit"));
    }

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(": {label}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Placeholder shown in place of a list: the error if the load failed,
/// otherwise `empty`.
pub fn empty_state<'a>(error: Option<&'a str>, empty: &'a str) -> Paragraph<'a> {
    let line = match error {
        Some(e) => Line::from(Span::styled(e, Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(empty, Style::default().fg(Color::DarkGray))),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

/// Single-line error shown above data that is still from the previous load.
pub fn error_line(error: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("! ", Style::default().fg(Color::Red)),
        Span::styled(error, Style::default().fg(Color::Red)),
    ])
}
