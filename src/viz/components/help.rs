use ratatui::{prelude::*, widgets::*};

fn key(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(description),
    ])
}

/// Centered popup listing the key bindings of the selected tab
pub fn render_help(area: Rect, buf: &mut Buffer, logs_tab: bool) {
    let mut lines = vec![
        key("  q  ", "Quit"),
        key("  h  ", "Toggle help popup"),
        key(" Tab ", "Next algorithm (starts over)"),
    ];

    if logs_tab {
        lines.extend([
            key("  s  ", "Toggle target selector"),
            key("  f  ", "Focus on the selected target"),
            key("⬆ / ⬇", "Switch log target"),
            key("⬅ / ➡", "Shown log level"),
            key("- / +", "Captured log level"),
            key("PgUp ", "Page up in log history"),
            key("PgDn ", "Page down in log history"),
            key(" Esc ", "Leave page mode"),
        ]);
    } else {
        lines.extend([
            key("Space", "Pause / resume auto-play"),
            key("  n  ", "Single step"),
            key("  r  ", "Reset values and agent"),
        ]);
    }

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length((lines.len() + 4) as u16),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(60),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title(" Help "),
        )
        .render(center, buf);
}
