use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rop_core::{Feature, Prediction};

use crate::app::Context;
use crate::state::form::{Field, FormState, Outcome};
use crate::ui::{theme::Theme, widgets};

use super::{Action, Screen};

const TITLE: &str = "Rock Penetration Rate Prediction (ROP)";
const SUBTITLE: &str =
    "Enter drilling/mechanical & rock properties to predict penetration rate (m/min).";
const INPUT_WIDTH: u16 = 16;

pub fn handle_key(state: &mut FormState, key: KeyCode, ctx: &Context) -> Action {
    match key {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Up | KeyCode::BackTab => state.select_prev(),
        KeyCode::Down | KeyCode::Tab => state.select_next(),
        KeyCode::Enter => state.predict(&ctx.pipeline),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Delete => state.reset_selected(),
        KeyCode::Char('?') => {
            return Action::Transition(Screen::Help(std::mem::take(state)));
        }
        KeyCode::Char(c) => {
            state.push_char(c);
        }
        _ => {}
    }
    Action::None
}

pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = widgets::centered_rect(92, 100, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(Feature::ALL.len() as u16 + 3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled(TITLE, Theme::title())).alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(SUBTITLE, Theme::dim())).alignment(Alignment::Center),
        chunks[1],
    );

    draw_fields(f, chunks[3], state);
    draw_button(f, chunks[4], state);
    draw_outcome(f, chunks[5], state.outcome());

    widgets::hint_bar(
        f,
        chunks[7],
        &[
            ("↑↓ / tab", "field"),
            ("enter", "predict"),
            ("del", "reset field"),
            ("?", "help"),
            ("esc", "quit"),
        ],
    );
}

fn draw_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (drilling, rock): (Vec<&Field>, Vec<&Field>) = state
        .fields()
        .iter()
        .partition(|field| field.feature.is_drilling_parameter());

    draw_column(f, cols[0], "Drilling Parameters", &drilling, state.selected());
    draw_column(f, cols[1], "Rock Properties", &rock, state.selected());
}

fn draw_column(f: &mut Frame, area: Rect, title: &str, fields: &[&Field], selected: Feature) {
    let active = fields.iter().any(|field| field.feature == selected);
    let block = widgets::panel(title, active);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (field, row) in fields.iter().zip(rows.iter()) {
        draw_field(f, *row, field, field.feature == selected);
    }
}

fn draw_field(f: &mut Frame, area: Rect, field: &Field, selected: bool) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(INPUT_WIDTH)])
        .split(area);

    let (prefix, label_style) = if selected {
        ("▶ ", Theme::accent())
    } else {
        ("  ", Theme::text())
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prefix, label_style),
            Span::styled(field.feature.label(), label_style),
        ])),
        cols[0],
    );

    let input_style = match (selected, field.is_valid()) {
        (_, false) => Theme::error(),
        (true, true) => Theme::input_active(),
        (false, true) => Theme::input(),
    };
    let cursor = if selected { "▏" } else { " " };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}{cursor}", field.input), input_style)),
        cols[1],
    );
}

fn draw_button(f: &mut Frame, area: Rect, state: &FormState) {
    let button = widgets::centered_rect(30, 100, area);
    let style = if state.features().is_ok() {
        Theme::accent()
    } else {
        Theme::muted()
    };

    f.render_widget(
        Paragraph::new(Span::styled("Predict ROP", style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style),
            ),
        button,
    );
}

fn draw_outcome(f: &mut Frame, area: Rect, outcome: Option<&Outcome>) {
    let lines = match outcome {
        None => vec![Line::from(Span::styled(
            "Press enter to predict.",
            Theme::muted(),
        ))],
        Some(Outcome::Predicted {
            prediction,
            warnings,
        }) => {
            let mut lines = vec![result_line(prediction)];
            if !warnings.is_empty() {
                let names = warnings
                    .iter()
                    .map(|w| w.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(Line::from(vec![
                    Span::styled(" ! ", Theme::warn()),
                    Span::styled(format!("outside physical range: {names}"), Theme::warn()),
                ]));
            }
            lines
        }
        Some(Outcome::Failed(msg)) => vec![Line::from(vec![
            Span::styled(" ✖ ", Theme::error()),
            Span::styled(msg.as_str(), Theme::error()),
        ])],
    };

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(widgets::panel("Result", false)),
        area,
    );
}

fn result_line(prediction: &Prediction) -> Line<'static> {
    Line::from(vec![
        Span::styled("Predicted Penetration Rate (ROP): ", Theme::text()),
        Span::styled(
            format!("{prediction} {}", Prediction::UNIT),
            Theme::ok(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::test_context;

    fn render(state: &FormState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn press(state: &mut FormState, keys: &[KeyCode], ctx: &Context) {
        for key in keys {
            assert!(matches!(handle_key(state, *key, ctx), Action::None));
        }
    }

    #[test]
    fn renders_every_label_and_the_button() {
        let shown = render(&FormState::new());
        assert!(shown.contains(TITLE));
        assert!(shown.contains("Drilling Parameters"));
        assert!(shown.contains("Rock Properties"));
        for feature in Feature::ALL {
            assert!(shown.contains(feature.label()), "{feature:?}");
        }
        assert!(shown.contains("Predict ROP"));
        assert!(!shown.contains("Predicted Penetration Rate"));
    }

    #[test]
    fn enter_predicts_from_the_defaults() {
        let ctx = test_context();
        let mut state = FormState::new();
        press(&mut state, &[KeyCode::Enter], &ctx);

        assert!(render(&state).contains("Predicted Penetration Rate (ROP): 1.200 m/min"));
    }

    #[test]
    fn editing_ucs_changes_the_prediction() {
        let ctx = test_context();
        let mut state = FormState::new();
        let mut keys = vec![KeyCode::Down; Feature::Ucs.index()];
        keys.push(KeyCode::Delete);
        // "85.0"
        keys.extend([KeyCode::Backspace; 4]);
        keys.extend("125".chars().map(KeyCode::Char));
        keys.push(KeyCode::Enter);
        press(&mut state, &keys, &ctx);

        assert_eq!(state.fields()[Feature::Ucs.index()].input, "125");
        assert!(render(&state).contains("0.500 m/min"));
    }

    #[test]
    fn malformed_input_reports_the_field() {
        let ctx = test_context();
        let mut state = FormState::new();
        press(
            &mut state,
            &[KeyCode::Char('e'), KeyCode::Char('e'), KeyCode::Enter],
            &ctx,
        );

        let shown = render(&state);
        assert!(shown.contains("Rock Drill Power (kW): '14.0ee' is not a number"));
    }

    #[test]
    fn help_keeps_the_form_and_escape_quits() {
        let ctx = test_context();
        let mut state = FormState::new();
        press(&mut state, &[KeyCode::Char('7')], &ctx);

        let help = match handle_key(&mut state, KeyCode::Char('?'), &ctx) {
            Action::Transition(Screen::Help(kept)) => kept,
            _ => panic!("expected the help screen"),
        };
        assert_eq!(help.fields()[0].input, "14.07");
        assert_eq!(state, FormState::new());

        assert!(matches!(
            handle_key(&mut state, KeyCode::Esc, &ctx),
            Action::Quit
        ));
    }
}
