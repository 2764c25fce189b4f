use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use rop_core::{Feature, FEATURE_COUNT};

use crate::app::Context;
use crate::state::form::FormState;
use crate::ui::{theme::Theme, widgets};

use super::{Action, Screen};

const KEYS: &[(&str, &str)] = &[
    ("↑ ↓ tab", "move between fields"),
    ("0-9 . - + e", "edit the selected field"),
    ("backspace", "delete a character"),
    ("del", "restore the field default"),
    ("enter", "predict"),
    ("esc", "quit"),
];

/// Any key returns to the form as it was left.
pub fn handle_key(form: &mut FormState, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => Action::Quit,
        _ => Action::Transition(Screen::Form(std::mem::take(form))),
    }
}

pub fn draw(f: &mut Frame, ctx: &Context) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = widgets::centered_rect(80, 100, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FEATURE_COUNT as u16 + 3),
            Constraint::Length(5),
            Constraint::Length(KEYS.len() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    draw_columns(f, chunks[0]);
    draw_artifacts(f, chunks[1], ctx);

    let block = widgets::panel("Keys", false);
    let inner = block.inner(chunks[2]);
    f.render_widget(block, chunks[2]);
    widgets::key_table(f, inner, KEYS);

    widgets::hint_bar(f, chunks[4], &[("any key", "back"), ("esc", "quit")]);
}

/// The order in which inputs reach the scaler and the model.
fn draw_columns(f: &mut Frame, area: Rect) {
    let rows = Feature::ALL.iter().map(|feature| {
        Row::new(vec![
            Cell::from(feature.index().to_string()),
            Cell::from(feature.label()),
            Cell::from(feature.column()),
            Cell::from(format!("{:?}", feature.default_value())),
        ])
        .style(Theme::text())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(28),
            Constraint::Length(26),
            Constraint::Min(8),
        ],
    )
    .header(Row::new(vec!["#", "input", "column", "default"]).style(Theme::accent()))
    .block(widgets::panel("Model Columns", false));

    f.render_widget(table, area);
}

fn draw_artifacts(f: &mut Frame, area: Rect, ctx: &Context) {
    let model = ctx.pipeline.model();
    let lines = vec![
        Line::from(vec![
            Span::styled("model   ", Theme::dim()),
            Span::styled(ctx.paths.model.display().to_string(), Theme::text()),
            Span::styled(
                format!(
                    "  ({} trees, {})",
                    model.num_trees(),
                    model.objective().name()
                ),
                Theme::muted(),
            ),
        ]),
        Line::from(vec![
            Span::styled("scaler  ", Theme::dim()),
            Span::styled(ctx.paths.scaler.display().to_string(), Theme::text()),
            Span::styled(
                format!("  ({})", ctx.pipeline.scaler().kind()),
                Theme::muted(),
            ),
        ]),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(widgets::panel("Artifacts", false)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::test_context;

    #[test]
    fn lists_columns_and_loaded_artifacts() {
        let ctx = test_context();
        let mut terminal = Terminal::new(TestBackend::new(300, 40)).unwrap();
        terminal.draw(|f| draw(f, &ctx)).unwrap();

        let shown: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(shown.contains("p-wave_velocity_km/s"));
        assert!(shown.contains("density_g/cm3"));
        assert!(shown.contains("(3 trees, reg:squarederror)"));
        assert!(shown.contains("(standard)"));
    }

    #[test]
    fn any_key_returns_to_the_same_form() {
        let mut form = FormState::new();
        form.push_char('3');
        let expected = form.clone();

        match handle_key(&mut form, KeyCode::Char('x')) {
            Action::Transition(Screen::Form(back)) => assert_eq!(back, expected),
            _ => panic!("expected the form"),
        }
    }
}
