use super::*;
use crate::app::ReportTab;
use deskmem_api::models::{DailyReport, HourlyReport};
use deskmem_api::timezone::{self, FormatOptions};

pub fn render_reports_view(frame: &mut Frame, app: &App, body: Rect) {
    let reports = &app.reports;
    let area = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    let tab_titles = vec![
        Line::from(format!("Hourly ({})", timezone::iso_date(reports.date))),
        Line::from("Daily (last 7 days)"),
    ];
    let tabs = Tabs::new(tab_titles)
        .select(match reports.tab {
            ReportTab::Hourly => 0,
            ReportTab::Daily => 1,
        })
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area[1]);
    frame.render_widget(block, area[1]);

    let lines: Vec<Line> = match reports.tab {
        ReportTab::Hourly => reports.hourly.iter().flat_map(hourly_lines).collect(),
        ReportTab::Daily => reports.daily.iter().flat_map(daily_lines).collect(),
    };

    if lines.is_empty() {
        frame.render_widget(
            widgets::empty_state(reports.error.as_deref(), "No reports for this period"),
            inner,
        );
        return;
    }

    let mut all = Vec::with_capacity(lines.len() + 1);
    if let Some(err) = &reports.error {
        all.push(widgets::error_line(err));
    }
    all.extend(lines);
    frame.render_widget(Paragraph::new(all).wrap(Wrap { trim: false }), inner);
}

fn minutes_line(work: u32, study: u32, entertainment: u32, other: u32) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (label, minutes) in [
        ("work", work),
        ("study", study),
        ("entertainment", entertainment),
        ("other", other),
    ] {
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(utils::category_color(label, 0)),
        ));
        spans.push(Span::styled(
            format!("{}  ", utils::format_minutes(minutes)),
            Style::default().fg(Color::White),
        ));
    }
    Line::from(spans)
}

fn hourly_lines(report: &HourlyReport) -> Vec<Line<'static>> {
    let window = format!(
        "{} – {}",
        timezone::format(report.start_time, FormatOptions::time_only()),
        timezone::format(report.end_time, FormatOptions::time_only())
    );
    vec![
        Line::from(vec![
            Span::styled(
                window,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} screenshot(s)", report.screenshot_count),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        minutes_line(
            report.work_minutes,
            report.study_minutes,
            report.entertainment_minutes,
            report.other_minutes,
        ),
        Line::from(Span::styled(
            format!("  {}", report.summary.clone().unwrap_or_default()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ]
}

fn daily_lines(report: &DailyReport) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                timezone::iso_date(report.date),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} screenshot(s)", report.screenshot_count),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        minutes_line(
            report.work_minutes,
            report.study_minutes,
            report.entertainment_minutes,
            report.other_minutes,
        ),
        Line::from(Span::styled(
            format!("  {}", report.summary.clone().unwrap_or_default()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ]
}
