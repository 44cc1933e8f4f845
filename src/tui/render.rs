use std::borrow::Cow;

use super::state::{AppState, SourceHealth};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, state: &AppState) {
    if state.detail_open {
        render_detail(f, state);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header: city / weather / source status
            Constraint::Length(3), // search bar
            Constraint::Min(5),    // article cards
            Constraint::Length(6), // log pane
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    draw_search(f, state, chunks[1]);
    draw_cards(f, state, chunks[2]);
    draw_logs(f, state, chunks[3]);
    draw_footer(f, chunks[4]);
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let city_span = match &state.city {
        Some(city) => Span::styled(
            city.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("resolving...", Style::default().fg(Color::DarkGray)),
    };
    let temp_span = match &state.temperature_f {
        Some(temp) => Span::styled(
            format!("{} \u{00b0}F", temp),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("--.- \u{00b0}F", Style::default().fg(Color::DarkGray)),
    };

    let mut line1 = vec![
        Span::raw(" "),
        city_span,
        Span::raw("  "),
        temp_span,
    ];
    if let Some(wiki) = &state.wiki_url {
        line1.push(Span::raw("  "));
        line1.push(Span::styled(wiki.clone(), Style::default().fg(Color::DarkGray)));
    }

    let mut line2: Vec<Span> = vec![Span::raw(" ")];
    for (i, status) in state.source_status.iter().enumerate() {
        if i > 0 {
            line2.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        line2.push(Span::raw(format!("{}: ", status.label)));
        line2.push(match &status.health {
            SourceHealth::Pending => Span::styled("...", Style::default().fg(Color::DarkGray)),
            SourceHealth::Ok(count) => Span::styled(
                format!("{} articles", count),
                Style::default().fg(Color::Green),
            ),
            SourceHealth::Failed(_) => {
                Span::styled("FAILED", Style::default().fg(Color::Red))
            }
        });
    }
    if state.refreshing {
        line2.push(Span::styled(
            "  refreshing",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(at) = &state.last_refresh {
        line2.push(Span::styled(
            format!("  refreshed {}", at),
            Style::default().fg(Color::DarkGray),
        ));
    }
    line2.push(Span::styled(
        format!("  up {}", state.uptime()),
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default().title(" daybrief ").borders(Borders::ALL);
    let para = Paragraph::new(vec![Line::from(line1), Line::from(line2)]).block(block);
    f.render_widget(para, area);
}

fn draw_search(f: &mut Frame, state: &AppState, area: Rect) {
    let (content, style) = if let Some(buffer) = &state.search_input {
        (
            format!("{}\u{258f}", buffer),
            Style::default().fg(Color::Yellow),
        )
    } else if !state.search_query.is_empty() {
        (state.search_query.clone(), Style::default().fg(Color::White))
    } else {
        (
            "press / to search".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let title = if state.search_query.is_empty() && state.search_input.is_none() {
        " Search ".to_string()
    } else {
        format!(" Search [{}/{}] ", state.visible_count(), state.cards.len())
    };

    let block = Block::default().title(title).borders(Borders::ALL);
    let para = Paragraph::new(Line::from(Span::styled(content, style))).block(block);
    f.render_widget(para, area);
}

fn draw_cards(f: &mut Frame, state: &AppState, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;

    if state.cards.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No articles yet",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "waiting for the feed sources to respond",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().title(" Headlines ").borders(Borders::ALL);
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    if state.visible_count() == 0 {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No cards match \"{}\"", state.search_query),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "press r to reset the filter",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().title(" Headlines ").borders(Borders::ALL);
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    // source + author + date + padding; the title takes the rest
    let fixed_cols: usize = 16 + 20 + 10 + 3;
    let title_w = inner_width.saturating_sub(fixed_cols).max(8);

    let header = Row::new(vec!["Source", "Title", "Author", "Published"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .cards
        .iter()
        .filter(|c| !c.hidden)
        .map(|card| {
            let a = &card.article;
            let date: String = a.published_at.chars().take(10).collect();
            Row::new(vec![
                Cell::from(truncate_with_ellipsis(&a.source, 16).into_owned())
                    .style(Style::default().fg(Color::Cyan)),
                Cell::from(truncate_with_ellipsis(&a.title, title_w).into_owned()),
                Cell::from(truncate_with_ellipsis(&a.author, 20).into_owned())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(date).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(title_w as u16),
            Constraint::Length(20),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(
                " Headlines [{}/{}] ",
                state.selected + 1,
                state.visible_count(),
            ))
            .borders(Borders::ALL),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let max_width = area.width.saturating_sub(2) as usize; // borders
    let visible_lines = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible_lines)
        .map(|l| {
            let color = match l.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                _ => Color::DarkGray,
            };
            let prefix = format!(" {} [{}] ", l.time, l.level);
            let prefix_len = prefix.len();
            let msg_max = max_width.saturating_sub(prefix_len);
            let msg = truncate_with_ellipsis(&l.message, msg_max);
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(msg.into_owned()),
            ])
        })
        .collect();

    let block = Block::default().title(" Log ").borders(Borders::ALL);
    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("  [q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit  "),
        Span::styled("[/]", Style::default().fg(Color::Yellow)),
        Span::raw(" search  "),
        Span::styled("[r]", Style::default().fg(Color::Yellow)),
        Span::raw("eset  "),
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw("efresh  "),
        Span::styled("[j/k]", Style::default().fg(Color::Yellow)),
        Span::raw(" move  "),
        Span::styled("[g/G]", Style::default().fg(Color::Yellow)),
        Span::raw(" top/bottom  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" detail  "),
    ]);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}

/// Full-screen detail view for the selected card: title, summary, author,
/// source, and the outbound link.
fn render_detail(f: &mut Frame, state: &AppState) {
    let Some(card) = state.selected_card() else { return };
    let a = &card.article;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let mut lines = vec![
        Line::from(Span::styled(
            a.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if !a.summary.is_empty() {
        lines.push(Line::from(Span::raw(a.summary.clone())));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Author:    ", Style::default().fg(Color::DarkGray)),
        Span::raw(a.author.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Source:    ", Style::default().fg(Color::DarkGray)),
        Span::raw(a.source.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Published: ", Style::default().fg(Color::DarkGray)),
        Span::raw(a.published_at.clone()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Link:      ", Style::default().fg(Color::DarkGray)),
        Span::styled(a.url.clone(), Style::default().fg(Color::Blue)),
    ]));
    if !a.image_url.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Image:     ", Style::default().fg(Color::DarkGray)),
            Span::styled(a.image_url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }

    let block = Block::default().title(" Article ").borders(Borders::ALL);
    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(para, chunks[0]);

    let help = Line::from(vec![
        Span::styled("  [Esc/Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" close  "),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}
