//! Code shown in the editor, per problem and language.
//!
//! Three sources compete for the buffer: what the user typed (kept per
//! language while the problem stays open), the user's accepted submission,
//! and the problem's starter template. They win in that order.
use crate::{
    config::editor::{LOADING, PLACEHOLDER},
    language::Language,
    schema::ProblemId,
};
use log::{debug, info};
use std::{cell::RefCell, collections::HashMap};

mod resolve;
mod source;

pub use source::CodeSource;

/// Identifies one fetch. Its result is committed only while nothing newer
/// has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    problem: ProblemId,
    language: Language,
    generation: u64,
}

#[derive(Default)]
struct State {
    problem: Option<ProblemId>,
    language: Language,
    buffer: String,
    templates: HashMap<(ProblemId, Language), String>,
    user_code: HashMap<Language, String>,
    generation: u64,
    pending: Option<Ticket>,
}
impl State {
    fn open(&mut self, problem: ProblemId) {
        if self.problem != Some(problem) {
            if let Some(old) = self.problem {
                info!("Leaving problem {} for {}", old, problem);
            }
            self.templates.clear();
            self.user_code.clear();
            self.problem = Some(problem);
        }
    }
    fn supersede(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
    fn begin(&mut self, problem: ProblemId, language: Language) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            problem,
            language,
            generation: self.generation,
        };
        self.language = language;
        self.buffer = String::from(LOADING);
        self.pending = Some(ticket);
        ticket
    }
    fn is_current(&self, ticket: &Ticket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }
    /// Adopts `text` if `ticket` is still the newest fetch, and returns
    /// whatever the buffer holds afterwards.
    fn commit(&mut self, ticket: &Ticket, language: Language, text: String) -> String {
        if self.is_current(ticket) {
            self.language = language;
            self.buffer = text;
            self.pending = None;
        } else {
            debug!(
                "Dropping stale code for problem {} in {}",
                ticket.problem, ticket.language
            );
        }
        self.buffer.clone()
    }
    /// The buffer is worth keeping when the user could have typed it.
    fn save_buffer(&mut self) {
        if self.pending.is_none() && self.problem.is_some() && self.buffer != PLACEHOLDER {
            self.user_code.insert(self.language, self.buffer.clone());
        }
    }
}

pub struct EditorSessionCache<S> {
    source: S,
    state: RefCell<State>,
}

impl<S> EditorSessionCache<S> {
    pub fn new(source: S, language: Language) -> Self {
        Self {
            source,
            state: RefCell::new(State {
                language,
                ..State::default()
            }),
        }
    }
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn problem(&self) -> Option<ProblemId> {
        self.state.borrow().problem
    }
    pub fn language(&self) -> Language {
        self.state.borrow().language
    }
    pub fn buffer(&self) -> String {
        self.state.borrow().buffer.clone()
    }
    /// A fetch for the current selection is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
    pub fn has_user_code(&self, language: Language) -> bool {
        self.state.borrow().user_code.contains_key(&language)
    }
    pub fn has_template(&self, problem: ProblemId, language: Language) -> bool {
        self.state
            .borrow()
            .templates
            .contains_key(&(problem, language))
    }

    /// The user typed `text` in the current language. Any fetch still in
    /// flight loses to it.
    pub fn edit<T: Into<String>>(&self, text: T) {
        let mut state = self.state.borrow_mut();
        let text = text.into();
        state.supersede();
        let language = state.language;
        if state.problem.is_some() {
            state.user_code.insert(language, text.clone());
        }
        state.buffer = text;
    }

    /// Forgets everything about the open problem.
    pub fn leave(&self) {
        let mut state = self.state.borrow_mut();
        let language = state.language;
        let generation = state.generation + 1;
        *state = State {
            language,
            generation,
            ..State::default()
        };
    }
}
