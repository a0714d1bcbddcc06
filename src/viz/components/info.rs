use ratatui::{prelude::*, widgets::*};

use crate::sim::{Learner, Mode, Simulation, StepOutcome};

fn update_rule(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::ValueIteration => &[
            "U(s) ← R(s) + γ · max_a Σ P(s'|s,a) · U(s')",
            "",
            "Synchronous sweep over the known model:",
            "0.8 intended, 0.1 for each side.",
        ],
        Mode::Online(Learner::TemporalDifference) => &[
            "U(s) ← U(s) + α · (r + γ · U(s') − U(s))",
            "",
            "Predicts state values of the policy",
            "being followed. Learns no Q-values.",
        ],
        Mode::Online(Learner::QLearning) => &[
            "Q(s,a) ← Q(s,a) + α · (r + γ · max_a' Q(s',a') − Q(s,a))",
            "",
            "Off-policy: bootstraps from the best",
            "next action, whatever is taken next.",
        ],
        Mode::Online(Learner::Sarsa) => &[
            "Q(s,a) ← Q(s,a) + α · (r + γ · Q(s',a') − Q(s,a))",
            "",
            "On-policy: bootstraps from the action",
            "the agent actually takes next.",
        ],
    }
}

/// Side panel with the active update rule, the parameters and the episode statistics
pub struct InfoPanel<'a> {
    pub sim: &'a Simulation,
    pub last: Option<&'a StepOutcome>,
    pub paused: bool,
}

impl InfoPanel<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        let heading = |s: &'static str| Line::styled(s, Style::new().light_cyan().bold());
        let field = |name: &'static str, value: String| {
            Line::from(vec![Span::raw(format!("{name:<14}")), Span::raw(value).bold()])
        };

        let mode = self.sim.mode();
        let params = self.sim.params();
        let stats = self.sim.stats();

        let mut lines = vec![heading("Update rule")];
        lines.extend(update_rule(mode).iter().map(|&s| Line::raw(s)));
        lines.push(Line::default());

        lines.push(heading("Parameters"));
        lines.push(field("gamma", format!("{:.2}", params.gamma)));
        if let Mode::Online(_) = mode {
            lines.push(field("alpha", format!("{:.2}", params.alpha)));
            lines.push(field("epsilon", format!("{:.2}", params.epsilon)));
        }
        lines.push(field("step reward", format!("{:+.2}", params.step_reward)));
        lines.push(Line::default());

        lines.push(heading("Progress"));
        match mode {
            Mode::ValueIteration => lines.push(field("sweeps", stats.sweeps.to_string())),
            Mode::Online(_) => {
                let agent = self.sim.agent();
                lines.push(field("episodes", stats.episodes.to_string()));
                lines.push(field("steps", format!("{} ({} total)", stats.steps, stats.total_steps)));
                lines.push(field("return", format!("{:+.3}", agent.total_reward)));
                if let Some(ret) = stats.last_return {
                    lines.push(field("last return", format!("{:+.3}", ret)));
                }
                if let Some(outcome) = self.last {
                    let exp = outcome.exp;
                    lines.push(field(
                        "last move",
                        format!("{:?} {} {:?}", exp.state, exp.action.arrow(), exp.next_state),
                    ));
                    lines.push(field("TD error", format!("{:+.4}", outcome.td_error)));
                }
            }
        }
        lines.push(Line::default());

        lines.push(if self.paused {
            Line::styled("⏸ paused", Style::new().yellow())
        } else {
            Line::styled(
                format!("▶ stepping every {} ms", mode.tick_interval().as_millis()),
                Style::new().light_green(),
            )
        });

        lines
    }
}

impl Widget for InfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .padding(Padding::horizontal(1))
                    .title(" Info "),
            )
            .render(area, buf);
    }
}
