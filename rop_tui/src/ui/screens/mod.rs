pub mod form;
pub mod help;

use crossterm::event::KeyCode;
use ratatui::Frame;

use crate::app::Context;
use crate::state::form::FormState;

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Form(FormState),
    /// Holds the form so edits survive a visit to the help screen.
    Help(FormState),
}

impl Screen {
    pub fn draw(&self, f: &mut Frame, ctx: &Context) {
        match self {
            Screen::Form(s) => form::draw(f, s),
            Screen::Help(_) => help::draw(f, ctx),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, ctx: &Context) -> Action {
        match self {
            Screen::Form(s) => form::handle_key(s, key, ctx),
            Screen::Help(s) => help::handle_key(s, key),
        }
    }
}
