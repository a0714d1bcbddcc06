use ratatui::{prelude::*, widgets::*};

use crate::{
    grid::{Cell, Tile},
    sim::Simulation,
    viz::util::utility_color,
};

/// Read-only view of the grid: one box per cell with its utility, policy and the agent
pub struct GridView<'a> {
    sim: &'a Simulation,
}

impl<'a> GridView<'a> {
    pub fn new(sim: &'a Simulation) -> Self {
        Self { sim }
    }

    fn render_cell(&self, cell: &Cell, area: Rect, buf: &mut Buffer) {
        let agent_here = self.sim.is_agent_at(cell.pos());

        let (background, value) = match cell.tile() {
            Tile::Wall => (Color::DarkGray, String::new()),
            Tile::Terminal if cell.reward() >= 0.0 => (Color::Green, format!("{:+.2}", cell.reward())),
            Tile::Terminal => (Color::Red, format!("{:+.2}", cell.reward())),
            Tile::Empty | Tile::Start => {
                (utility_color(cell.utility()), format!("{:+.3}", cell.utility()))
            }
        };

        let mut lines = vec![Line::styled(value, Style::new().bold())];
        if let Some(action) = cell.policy() {
            lines.push(Line::raw(action.arrow().to_string()));
        }
        if agent_here {
            lines.push(Line::styled("● agent", Style::new().yellow().bold()));
        }

        let title = match cell.tile() {
            Tile::Start => format!(" {:?} start ", cell.pos()),
            Tile::Wall => String::from(" wall "),
            _ => format!(" {:?} ", cell.pos()),
        };

        let block = Block::bordered()
            .title(title)
            .border_type(if agent_here {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(if agent_here {
                Style::new().yellow()
            } else {
                Style::new().gray()
            });

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().bg(background).white())
            .block(block)
            .render(area, buf);
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.sim.grid();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.sim.mode()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical(vec![Constraint::Ratio(1, grid.rows() as u32); grid.rows()])
            .split(inner);
        for (r, row_area) in rows.iter().enumerate() {
            let cols =
                Layout::horizontal(vec![Constraint::Ratio(1, grid.cols() as u32); grid.cols()])
                    .split(*row_area);
            for (cell, cell_area) in grid.row(r).iter().zip(cols.iter()) {
                self.render_cell(cell, *cell_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algo::Params, sim::Mode};

    fn rendered(sim: &Simulation) -> String {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        GridView::new(sim).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_terminals_and_agent() {
        let sim = Simulation::seeded(Mode::ValueIteration, Params::default(), 0);
        let text = rendered(&sim);
        assert!(text.contains("+1.00"), "Goal reward drawn");
        assert!(text.contains("-1.00"), "Pit reward drawn");
        assert!(text.contains("agent"), "Agent drawn");
        assert!(text.contains("wall"), "Wall drawn");
    }

    #[test]
    fn shows_policy_after_a_sweep() {
        let mut sim = Simulation::seeded(Mode::ValueIteration, Params::default(), 0);
        sim.step();
        assert!(rendered(&sim).contains('→'), "Policy arrow drawn");
    }
}
