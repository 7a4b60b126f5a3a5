use super::{CodeSource, EditorSessionCache, Ticket};
use crate::{config::editor::PLACEHOLDER, language::Language, schema::ProblemId};
use log::{info, warn};

impl<S: CodeSource> EditorSessionCache<S> {
    /// Code to show when `problem` is opened: the accepted solution in
    /// whatever language it was written, else the template for the current
    /// language.
    pub async fn resolve_initial(&self, problem: ProblemId) -> String {
        let ticket = {
            let mut state = self.state.borrow_mut();
            state.open(problem);
            let language = state.language;
            if let Some(code) = state.user_code.get(&language).cloned() {
                state.supersede();
                state.buffer = code.clone();
                return code;
            }
            state.begin(problem, language)
        };
        match self.source.accepted(problem, None).await {
            Ok(Some(sub)) => {
                info!(
                    "Restoring accepted {} solution of problem {}",
                    sub.language, problem
                );
                return self
                    .state
                    .borrow_mut()
                    .commit(&ticket, sub.language, sub.code);
            }
            Ok(None) => (),
            Err(e) => warn!("Accepted submission of problem {}: {}", problem, e),
        }
        self.load_template(ticket).await
    }

    /// Keeps the current buffer for later and shows `language` instead.
    pub async fn switch_language(&self, problem: ProblemId, language: Language) -> String {
        let ticket = {
            let mut state = self.state.borrow_mut();
            if state.problem == Some(problem) && state.language == language {
                return state.buffer.clone();
            }
            state.save_buffer();
            state.open(problem);
            if let Some(code) = state.user_code.get(&language).cloned() {
                state.supersede();
                state.language = language;
                state.buffer = code.clone();
                return code;
            }
            state.begin(problem, language)
        };
        match self.source.accepted(problem, Some(language)).await {
            Ok(Some(sub)) => {
                info!("Restoring accepted {} solution of problem {}", language, problem);
                return self.state.borrow_mut().commit(&ticket, language, sub.code);
            }
            Ok(None) => (),
            Err(e) => warn!("Accepted submission of problem {}: {}", problem, e),
        }
        self.load_template(ticket).await
    }

    /// Throws away the edits made in `language` and goes back to the starter
    /// template, even when an accepted solution exists.
    pub async fn reset(&self, problem: ProblemId, language: Language) -> String {
        let ticket = {
            let mut state = self.state.borrow_mut();
            state.open(problem);
            state.user_code.remove(&language);
            state.begin(problem, language)
        };
        self.load_template(ticket).await
    }

    async fn load_template(&self, ticket: Ticket) -> String {
        let key = (ticket.problem, ticket.language);
        {
            let mut state = self.state.borrow_mut();
            if !state.is_current(&ticket) {
                return state.buffer.clone();
            }
            if let Some(code) = state.templates.get(&key).cloned() {
                return state.commit(&ticket, ticket.language, code);
            }
        }
        match self.source.template(ticket.problem, ticket.language).await {
            Ok(template) => {
                let mut state = self.state.borrow_mut();
                if state.problem == Some(ticket.problem) {
                    state.templates.insert(key, template.code.clone());
                }
                state.commit(&ticket, ticket.language, template.code)
            }
            Err(e) => {
                warn!(
                    "Template of problem {} in {}: {}",
                    ticket.problem, ticket.language, e
                );
                self.state
                    .borrow_mut()
                    .commit(&ticket, ticket.language, String::from(PLACEHOLDER))
            }
        }
    }
}
