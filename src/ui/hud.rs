use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::GameState;

const HUD_HEIGHT: u16 = 1;

/// Draws the score row above the playfield and returns the area left for it.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) -> Rect {
    let [hud_row, play_area] =
        Layout::vertical([Constraint::Length(HUD_HEIGHT), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(state)).alignment(Alignment::Left),
        hud_row,
    );

    play_area
}

fn hud_line(state: &GameState) -> Line<'static> {
    let label = Style::new().fg(Color::DarkGray);
    let value = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(" Score ", label),
        Span::styled(state.score().to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(state.snake().len().to_string(), value),
    ])
}

#[cfg(test)]
mod tests {
    use crate::config::SimulationConfig;
    use crate::game::GameState;

    use super::hud_line;

    #[test]
    fn hud_shows_score_and_length() {
        let state = GameState::new_with_seed(SimulationConfig::default(), 1);

        let text: String = hud_line(&state)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();

        assert_eq!(text, " Score 0  Length 1");
    }
}
