use super::*;

pub fn render_login_view(frame: &mut Frame, app: &App) {
    let area = utils::centered_rect(52, 11, frame.area());
    frame.render_widget(Clear, area);

    let login = &app.login;
    let masked = "•".repeat(login.password.value.chars().count());
    let field_style = if login.submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter the access password",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::Yellow)),
            Span::styled(masked, field_style),
        ]),
        Line::from(""),
    ];

    if let Some(err) = &login.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else if login.submitting {
        lines.push(Line::from(Span::styled(
            "Logging in...",
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(status) = &app.status_message {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Cyan),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    let submit_style = if login.can_submit() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::styled("Enter", submit_style),
        Span::styled(": Log in  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(": Quit", Style::default().fg(Color::DarkGray)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Desktop Memory ",
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(2)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);

    if !login.submitting {
        let (before, _) = login.password.split_at_cursor();
        let x = area.x + 3 + "Password: ".len() as u16 + before.chars().count() as u16;
        frame.set_cursor_position((x, area.y + 4));
    }
}
