use crate::{
    api::{self, Session},
    language::Language,
    schema::{AcceptedSubmission, ProblemId, Template},
};
use async_trait::async_trait;
use std::rc::Rc;

/// Where the editor gets code it did not type itself.
#[async_trait(?Send)]
pub trait CodeSource {
    /// Last accepted solution; `None` language means any.
    async fn accepted(
        &self,
        problem: ProblemId,
        language: Option<Language>,
    ) -> api::Result<Option<AcceptedSubmission>>;
    async fn template(&self, problem: ProblemId, language: Language) -> api::Result<Template>;
}

#[async_trait(?Send)]
impl CodeSource for Session {
    async fn accepted(
        &self,
        problem: ProblemId,
        language: Option<Language>,
    ) -> api::Result<Option<AcceptedSubmission>> {
        Session::accepted(self, problem, language).await
    }
    async fn template(&self, problem: ProblemId, language: Language) -> api::Result<Template> {
        Session::template(self, problem, language).await
    }
}

#[async_trait(?Send)]
impl<T: CodeSource + ?Sized> CodeSource for Rc<T> {
    async fn accepted(
        &self,
        problem: ProblemId,
        language: Option<Language>,
    ) -> api::Result<Option<AcceptedSubmission>> {
        (**self).accepted(problem, language).await
    }
    async fn template(&self, problem: ProblemId, language: Language) -> api::Result<Template> {
        (**self).template(problem, language).await
    }
}
