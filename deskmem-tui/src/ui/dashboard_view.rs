use super::*;
use deskmem_api::models::Activity;
use deskmem_api::timezone::{self, FormatOptions};

pub fn render_dashboard_view(frame: &mut Frame, app: &App, body: Rect) {
    let dashboard = &app.dashboard;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(body);

    render_counts(frame, app, rows[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_distribution(frame, app, panels[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            " Recent activity ",
            Style::default().fg(Color::White),
        ));
    let inner = block.inner(panels[1]);
    frame.render_widget(block, panels[1]);

    if dashboard.recent.is_empty() {
        frame.render_widget(
            widgets::empty_state(dashboard.error.as_deref(), "No activity recorded yet"),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let items: Vec<ListItem> = dashboard
        .recent
        .iter()
        .map(|a| ListItem::new(activity_line(a, width)))
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn render_counts(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.dashboard;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" Today ({} UTC+8) ", timezone::today()),
            Style::default().fg(Color::White),
        ));

    let mut lines = Vec::new();
    match &dashboard.stats {
        Some(stats) => {
            let pending = stats.screenshot_count.saturating_sub(stats.analyzed_count);
            lines.push(Line::from(vec![
                Span::styled("Screenshots ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    stats.screenshot_count.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Activities ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    stats.activity_count.to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Analyzed ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    stats.analyzed_count.to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Pending ", Style::default().fg(Color::DarkGray)),
                Span::styled(pending.to_string(), Style::default().fg(Color::White)),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No statistics yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    if let Some(err) = &dashboard.error {
        lines.push(widgets::error_line(err));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block.padding(Padding::horizontal(1))),
        area,
    );
}

fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    use tui_piechart::{PieChart, PieSlice};

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            " Activity types ",
            Style::default().fg(Color::White),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entries = app
        .dashboard
        .stats
        .as_ref()
        .map(|s| s.distribution_by_count())
        .unwrap_or_default();
    let total: u64 = entries.iter().map(|(_, n)| n).sum();
    if total == 0 {
        frame.render_widget(widgets::empty_state(None, "No data"), inner);
        return;
    }

    let slices: Vec<PieSlice> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let pct = *count as f64 / total as f64 * 100.0;
            PieSlice::new(label, pct, utils::category_color(label, i))
        })
        .collect();

    let legend_rows = entries.len() as u16 + 1;
    let pie_height = (inner.width / 2)
        .min(inner.height.saturating_sub(legend_rows))
        .max(1);
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(pie_height), Constraint::Min(0)])
        .split(inner);

    let pie = PieChart::new(slices)
        .show_legend(false)
        .show_percentages(false);
    frame.render_widget(pie, split[0]);

    let legend: Vec<Line> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let pct = *count as f64 / total as f64 * 100.0;
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(utils::category_color(label, i))),
                Span::styled(
                    format!("{label}: {count} ({pct:.0}%)"),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .block(Block::default().padding(Padding::new(0, 0, 1, 0))),
        split[1],
    );
}

fn activity_line(activity: &Activity, width: usize) -> Line<'static> {
    let time = timezone::format(activity.timestamp, FormatOptions::time_only());
    let kind = activity.activity_type.clone().unwrap_or_else(|| "-".to_string());
    let app_name = activity.application.clone().unwrap_or_default();
    let description = activity.description.clone().unwrap_or_default();
    let used = time.len() + kind.chars().count() + app_name.chars().count() + 6;
    Line::from(vec![
        Span::styled(format!("{time} "), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("[{kind}] "),
            Style::default().fg(utils::category_color(&kind, 0)),
        ),
        Span::styled(format!("{app_name} "), Style::default().fg(Color::Cyan)),
        Span::styled(
            utils::truncate(&description, width.saturating_sub(used).max(8)),
            Style::default().fg(Color::Gray),
        ),
    ])
}
