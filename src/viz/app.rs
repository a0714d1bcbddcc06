use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, KeyCode};
use ratatui::{prelude::*, widgets::*};

use super::{
    components::{render_help, Component, GridView, InfoPanel, Logs},
    tui::{self, Tui},
    util::event_keycode,
};
use crate::sim::{Mode, Simulation, StepOutcome};

const LOGS_TAB: usize = Mode::ALL.len();

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    #[default]
    Playing,
    Paused,
    Quit,
}

/// The root TUI component which owns the simulation and drives its ticks
pub struct App {
    state: State,
    sim: Simulation,
    selected_tab: usize,
    logs: Logs,
    show_help: bool,
    last_tick: Instant,
    last_outcome: Option<StepOutcome>,
}

impl App {
    pub fn new(sim: Simulation) -> Self {
        let selected_tab = Mode::ALL
            .iter()
            .position(|&m| m == sim.mode())
            .unwrap_or_default();
        Self {
            state: State::default(),
            sim,
            selected_tab,
            logs: Logs::new(),
            show_help: false,
            last_tick: Instant::now(),
            last_outcome: None,
        }
    }

    /// Initialize the terminal and run the main loop
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = tui::init()?;
        let result = self.main_loop(&mut terminal);
        tui::restore()?;
        result
    }

    fn main_loop(&mut self, terminal: &mut Tui) -> io::Result<()> {
        while self.state != State::Quit {
            if self.state == State::Playing
                && self.last_tick.elapsed() >= self.sim.mode().tick_interval()
            {
                self.tick();
            }

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                if let Some(key) = event_keycode(&event::read()?) {
                    self.handle_key(key);
                }
            }
        }

        Ok(())
    }

    fn tick(&mut self) {
        self.last_outcome = self.sim.step();
        self.last_tick = Instant::now();
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.selected_tab == LOGS_TAB && self.logs.handle_key(key) {
            return;
        }

        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Tab => self.select_tab((self.selected_tab + 1) % (LOGS_TAB + 1)),
            KeyCode::BackTab => self.select_tab((self.selected_tab + LOGS_TAB) % (LOGS_TAB + 1)),
            KeyCode::Char(' ') => {
                self.state = match self.state {
                    State::Playing => State::Paused,
                    _ => State::Playing,
                }
            }
            KeyCode::Char('n') => self.tick(),
            KeyCode::Char('r') => {
                self.sim.reset();
                self.last_outcome = None;
            }
            _ => {}
        }
    }

    /// The logs tab keeps the current algorithm running
    fn select_tab(&mut self, tab: usize) {
        self.selected_tab = tab;
        if let Some(&mode) = Mode::ALL.get(tab) {
            if mode != self.sim.mode() {
                log::info!("Switching to {}", mode);
                self.sim.set_mode(mode);
                self.last_outcome = None;
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let titles = Mode::ALL.iter().map(|m| m.name()).chain(["Logs"]);
        Tabs::new(titles)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        if self.selected_tab == LOGS_TAB {
            self.logs.render(main_area, buf);
        } else {
            let [grid_area, info_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(48)]).areas(main_area);
            GridView::new(&self.sim).render(grid_area, buf);
            InfoPanel {
                sim: &self.sim,
                last: self.last_outcome.as_ref(),
                paused: self.state == State::Paused,
            }
            .render(info_area, buf);
        }

        Paragraph::new(Line::from(vec![
            Span::from(" h ").light_cyan().bold(),
            Span::raw("help  "),
            Span::from("Tab ").light_cyan().bold(),
            Span::raw("algorithm  "),
            Span::from("Space ").light_cyan().bold(),
            Span::raw("pause  "),
            Span::from("q ").light_cyan().bold(),
            Span::raw("quit"),
        ]))
        .render(hint_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab == LOGS_TAB);
        }
    }
}
