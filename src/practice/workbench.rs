//! The problem page's controller.
//!
//! The container drives the editor through [`Command`]s. Run, submit and
//! language switches share one busy flag: while any of them is in flight the
//! others are refused. Reset and leaving the problem are always allowed; they
//! discard the result of whatever judge request is still in flight.
use crate::{
    api::{self, Judge},
    credential::Credentials,
    editor::{CodeSource, EditorSessionCache},
    format::{format_run, format_submit, is_success},
    language::Language,
    schema::ProblemId,
};
use log::{info, warn};
use std::{
    cell::{Cell, RefCell},
    error::Error as StdError,
    fmt,
    result::Result as StdResult,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run,
    Submit,
    Reset,
    SwitchLanguage(Language),
    Edit(String),
}

#[derive(Debug)]
pub enum Error {
    Busy,
    NoProblem,
    SignInRequired,
    Unauthorized(api::Error),
    Unreachable(api::Error),
    Api(api::Error),
}
pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("Another action is still in progress"),
            Self::NoProblem => f.write_str("No problem selected"),
            Self::SignInRequired => f.write_str("Authentication required: sign in to submit"),
            Self::Unauthorized(_) => {
                f.write_str("Your session is no longer valid, please sign in again")
            }
            Self::Unreachable(e) => write!(
                f,
                "Could not reach the judge, the service may be unreachable ({})",
                e
            ),
            Self::Api(e) => write!(f, "Error: {}", e),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Unauthorized(e) | Self::Unreachable(e) | Self::Api(e) => Some(e),
            Self::Busy | Self::NoProblem | Self::SignInRequired => None,
        }
    }
}
impl crate::error::Error for Error {}
impl From<api::Error> for Error {
    fn from(e: api::Error) -> Self {
        if e.is_auth() {
            Self::Unauthorized(e)
        } else if e.is_network() {
            Self::Unreachable(e)
        } else {
            Self::Api(e)
        }
    }
}

/// What the result panel shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Output {
    pub text: String,
    /// Set for accepted submissions; selects the success theme.
    pub success: bool,
}

struct BusyGuard<'a>(&'a Cell<bool>);
impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Workbench<J, S> {
    judge: J,
    editor: EditorSessionCache<S>,
    credentials: Credentials,
    busy: Cell<bool>,
    output: RefCell<Output>,
    /// Bumped whenever the output panel is cleared. A judge result is shown
    /// only if no clear happened while it was pending.
    epoch: Cell<u64>,
}

impl<J: Judge, S: CodeSource> Workbench<J, S> {
    pub fn new(judge: J, source: S, credentials: Credentials, language: Language) -> Self {
        Self {
            judge,
            editor: EditorSessionCache::new(source, language),
            credentials,
            busy: Cell::new(false),
            output: RefCell::new(Output::default()),
            epoch: Cell::new(0),
        }
    }
    pub fn editor(&self) -> &EditorSessionCache<S> {
        &self.editor
    }
    pub fn output(&self) -> Output {
        self.output.borrow().clone()
    }
    pub fn is_busy(&self) -> bool {
        self.busy.get() || self.editor.is_loading()
    }

    fn acquire(&self) -> Result<BusyGuard<'_>> {
        if self.busy.replace(true) {
            return Err(Error::Busy);
        }
        let guard = BusyGuard(&self.busy);
        if self.editor.is_loading() {
            return Err(Error::Busy);
        }
        Ok(guard)
    }
    fn show<T: Into<String>>(&self, text: T, success: bool) {
        *self.output.borrow_mut() = Output {
            text: text.into(),
            success,
        };
    }
    fn clear(&self) {
        self.epoch.set(self.epoch.get() + 1);
        self.show("", false);
    }
    fn problem(&self) -> Result<ProblemId> {
        self.editor.problem().ok_or(Error::NoProblem)
    }

    /// Opens `problem` and returns the code to edit.
    pub async fn open(&self, problem: ProblemId) -> Result<String> {
        let _guard = self.acquire()?;
        self.clear();
        Ok(self.editor.resolve_initial(problem).await)
    }
    pub fn close(&self) {
        self.editor.leave();
        self.clear();
    }

    pub async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Edit(text) => {
                self.editor.edit(text);
                Ok(())
            }
            Command::Reset => {
                let problem = self.problem()?;
                self.clear();
                self.editor.reset(problem, self.editor.language()).await;
                Ok(())
            }
            Command::SwitchLanguage(language) => {
                let problem = self.problem()?;
                let _guard = self.acquire()?;
                self.editor.switch_language(problem, language).await;
                Ok(())
            }
            Command::Run => self.run().await,
            Command::Submit => self.submit().await,
        }
    }

    async fn run(&self) -> Result<()> {
        let problem = self.problem()?;
        let _guard = self.acquire()?;
        self.show("Running code...", false);
        let epoch = self.epoch.get();
        let result = self
            .judge
            .run(problem, &self.editor.buffer(), self.editor.language())
            .await;
        self.report(epoch, result.map(|r| format_run(&r)))
    }

    async fn submit(&self) -> Result<()> {
        let problem = self.problem()?;
        if !self.credentials.is_signed_in() {
            warn!("Submit requested without a stored token");
            let err = Error::SignInRequired;
            self.show(err.to_string(), false);
            return Err(err);
        }
        let _guard = self.acquire()?;
        self.show("Submitting code...", false);
        let epoch = self.epoch.get();
        let result = self
            .judge
            .submit(problem, &self.editor.buffer(), self.editor.language())
            .await;
        self.report(epoch, result.map(|r| format_submit(&r)))
    }

    fn report(&self, epoch: u64, report: api::Result<String>) -> Result<()> {
        if epoch != self.epoch.get() {
            info!("Dropping the result of a superseded judge request");
            return Ok(());
        }
        match report {
            Ok(text) => {
                let success = is_success(&text);
                if success {
                    info!("Submission accepted");
                }
                self.show(text, success);
                Ok(())
            }
            Err(e) => {
                let err = Error::from(e);
                self.show(err.to_string(), false);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::status_error,
        credential::MemoryStore,
        schema::{AcceptedSubmission, JudgeResult, TestOutcome, Template},
    };
    use async_trait::async_trait;
    use futures::join;
    use reqwest::StatusCode;
    use std::{collections::VecDeque, rc::Rc};
    use tokio::sync::Notify;

    struct Templates;
    #[async_trait(?Send)]
    impl CodeSource for Templates {
        async fn accepted(
            &self,
            _problem: ProblemId,
            _language: Option<Language>,
        ) -> api::Result<Option<AcceptedSubmission>> {
            Ok(None)
        }
        async fn template(&self, _problem: ProblemId, language: Language) -> api::Result<Template> {
            Ok(Template {
                code: format!("// {}", language),
            })
        }
    }

    #[derive(Default)]
    struct FakeJudge {
        replies: RefCell<VecDeque<api::Result<JudgeResult>>>,
        calls: RefCell<Vec<(String, Language)>>,
        gate: Option<Rc<Notify>>,
    }
    impl FakeJudge {
        fn reply(self, r: api::Result<JudgeResult>) -> Self {
            self.replies.borrow_mut().push_back(r);
            self
        }
        async fn answer(&self, code: &str, language: Language) -> api::Result<JudgeResult> {
            self.calls.borrow_mut().push((code.to_string(), language));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(verdict(1, 1)))
        }
    }
    #[async_trait(?Send)]
    impl Judge for FakeJudge {
        async fn run(&self, _p: ProblemId, code: &str, l: Language) -> api::Result<JudgeResult> {
            self.answer(code, l).await
        }
        async fn submit(&self, _p: ProblemId, code: &str, l: Language) -> api::Result<JudgeResult> {
            self.answer(code, l).await
        }
    }

    fn verdict(total: u32, passed: u32) -> JudgeResult {
        JudgeResult {
            message: String::from("Done"),
            total_tests: total,
            passed_tests: passed,
            execution_time: Some(0.01),
            test_results: (0..total)
                .map(|i| TestOutcome {
                    input: i.to_string(),
                    expected_output: i.to_string(),
                    actual_output: Some(i.to_string()),
                    error: None,
                    execution_time: None,
                    passed: i < passed,
                })
                .collect(),
        }
    }
    fn signed_in() -> Credentials {
        let c = Credentials::new(MemoryStore::new());
        c.set_token("tok").unwrap();
        c
    }

    #[tokio::test]
    async fn run_reports_every_sample() {
        let wb = Workbench::new(
            FakeJudge::default().reply(Ok(verdict(2, 1))),
            Templates,
            Credentials::new(MemoryStore::new()),
            Language::Python,
        );
        assert_eq!(wb.open(4).await.unwrap(), "// python");
        wb.dispatch(Command::Edit(String::from("print(1)"))).await.unwrap();
        wb.dispatch(Command::Run).await.unwrap();
        let out = wb.output();
        assert!(!out.success);
        assert_eq!(out.text.matches("Test Case ").count(), 2);
        assert_eq!(
            wb.judge.calls.borrow()[0],
            (String::from("print(1)"), Language::Python)
        );
        assert!(!wb.is_busy());
    }

    #[tokio::test]
    async fn submit_needs_a_token_before_any_request() {
        let wb = Workbench::new(
            FakeJudge::default(),
            Templates,
            Credentials::new(MemoryStore::new()),
            Language::Cpp,
        );
        wb.open(4).await.unwrap();
        wb.dispatch(Command::Edit(String::from("mine"))).await.unwrap();
        assert!(matches!(
            wb.dispatch(Command::Submit).await,
            Err(Error::SignInRequired)
        ));
        assert!(wb.judge.calls.borrow().is_empty());
        assert_eq!(wb.editor().buffer(), "mine");
        assert!(wb.output().text.contains("Authentication required"));
    }

    #[tokio::test]
    async fn accepted_submission_sets_success() {
        let wb = Workbench::new(
            FakeJudge::default().reply(Ok(verdict(3, 3))),
            Templates,
            signed_in(),
            Language::Java,
        );
        wb.open(4).await.unwrap();
        wb.dispatch(Command::Submit).await.unwrap();
        let out = wb.output();
        assert!(out.success);
        assert!(out.text.contains("Passed: 3/3"));
    }

    #[tokio::test]
    async fn rejected_token_keeps_the_buffer() {
        let wb = Workbench::new(
            FakeJudge::default().reply(Err(status_error(StatusCode::UNAUTHORIZED, None))),
            Templates,
            signed_in(),
            Language::Python,
        );
        wb.open(4).await.unwrap();
        wb.dispatch(Command::Edit(String::from("keep me"))).await.unwrap();
        let err = wb.dispatch(Command::Submit).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert!(wb.output().text.contains("sign in again"));
        assert_eq!(wb.editor().buffer(), "keep me");
    }

    #[tokio::test]
    async fn server_failure_reads_as_unreachable() {
        let wb = Workbench::new(
            FakeJudge::default().reply(Err(status_error(StatusCode::BAD_GATEWAY, None))),
            Templates,
            signed_in(),
            Language::Python,
        );
        wb.open(4).await.unwrap();
        let err = wb.dispatch(Command::Run).await.unwrap_err();
        assert!(matches!(err, Error::Unreachable(_)));
        assert!(wb.output().text.contains("may be unreachable"));
        assert!(!wb.is_busy());
    }

    #[tokio::test]
    async fn busy_flag_excludes_other_actions() {
        let gate = Rc::new(Notify::new());
        let judge = FakeJudge {
            gate: Some(gate.clone()),
            ..FakeJudge::default()
        };
        let wb = Workbench::new(judge, Templates, signed_in(), Language::Python);
        wb.open(4).await.unwrap();

        let running = wb.dispatch(Command::Run);
        let others = async {
            tokio::task::yield_now().await;
            assert!(wb.is_busy());
            let submit = wb.dispatch(Command::Submit).await;
            let switch = wb.dispatch(Command::SwitchLanguage(Language::C)).await;
            gate.notify_one();
            (submit, switch)
        };
        let (run, (submit, switch)) = join!(running, others);
        assert!(run.is_ok());
        assert!(matches!(submit, Err(Error::Busy)));
        assert!(matches!(switch, Err(Error::Busy)));
        assert_eq!(wb.editor().language(), Language::Python);
        assert_eq!(wb.judge.calls.borrow().len(), 1);
        assert!(!wb.is_busy());
    }

    #[tokio::test]
    async fn reset_clears_output() {
        let wb = Workbench::new(FakeJudge::default(), Templates, signed_in(), Language::Python);
        wb.open(4).await.unwrap();
        wb.dispatch(Command::Edit(String::from("x"))).await.unwrap();
        wb.dispatch(Command::Run).await.unwrap();
        assert!(!wb.output().text.is_empty());
        wb.dispatch(Command::Reset).await.unwrap();
        assert_eq!(wb.output(), Output::default());
        assert_eq!(wb.editor().buffer(), "// python");
    }

    #[tokio::test]
    async fn reset_discards_the_running_result() {
        let gate = Rc::new(Notify::new());
        let judge = FakeJudge {
            gate: Some(gate.clone()),
            ..FakeJudge::default()
        };
        let wb = Workbench::new(judge, Templates, signed_in(), Language::Python);
        wb.open(4).await.unwrap();
        wb.dispatch(Command::Edit(String::from("typed"))).await.unwrap();

        let running = wb.dispatch(Command::Run);
        let reset = async {
            tokio::task::yield_now().await;
            assert_eq!(wb.output().text, "Running code...");
            wb.dispatch(Command::Reset).await.unwrap();
            assert_eq!(wb.output(), Output::default());
            gate.notify_one();
        };
        let (run, ()) = join!(running, reset);
        assert!(run.is_ok());
        assert_eq!(wb.judge.calls.borrow().len(), 1);
        assert_eq!(wb.output(), Output::default());
        assert_eq!(wb.editor().buffer(), "// python");
        assert!(!wb.is_busy());

        gate.notify_one();
        wb.dispatch(Command::Run).await.unwrap();
        assert!(wb.output().text.contains("Passed: 1"));
    }

    #[tokio::test]
    async fn commands_need_an_open_problem() {
        let wb = Workbench::new(FakeJudge::default(), Templates, signed_in(), Language::Python);
        assert!(matches!(wb.dispatch(Command::Run).await, Err(Error::NoProblem)));
        wb.open(1).await.unwrap();
        wb.close();
        assert!(matches!(wb.dispatch(Command::Reset).await, Err(Error::NoProblem)));
    }
}
