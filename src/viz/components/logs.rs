use crossterm::event::KeyCode;
use log::LevelFilter;
use ratatui::prelude::*;
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use super::Component;

/// Captured log records of the running simulation
pub struct Logs {
    state: TuiWidgetState,
}

impl Logs {
    pub fn new() -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(LevelFilter::Debug),
        }
    }
}

impl Widget for &Logs {
    fn render(self, area: Rect, buf: &mut Buffer) {
        TuiLoggerSmartWidget::default()
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().gray())
            .output_separator(' ')
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let event = match key {
            KeyCode::Char(' ') => TuiWidgetEvent::SpaceKey,
            KeyCode::Esc => TuiWidgetEvent::EscapeKey,
            KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
            KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
            KeyCode::Up => TuiWidgetEvent::UpKey,
            KeyCode::Down => TuiWidgetEvent::DownKey,
            KeyCode::Left => TuiWidgetEvent::LeftKey,
            KeyCode::Right => TuiWidgetEvent::RightKey,
            KeyCode::Char('=') | KeyCode::Char('+') => TuiWidgetEvent::PlusKey,
            KeyCode::Char('-') | KeyCode::Char('_') => TuiWidgetEvent::MinusKey,
            KeyCode::Char('s') => TuiWidgetEvent::HideKey,
            KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
            _ => return false,
        };

        self.state.transition(event);
        true
    }
}
