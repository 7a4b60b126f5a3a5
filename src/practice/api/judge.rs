use super::{Result, Session};
use crate::{
    language::Language,
    schema::{JudgeResult, ProblemId, RunRequest},
};
use async_trait::async_trait;
use log::info;

/// Executes code against a problem's tests.
#[async_trait(?Send)]
pub trait Judge {
    /// Sample tests only.
    async fn run(&self, problem: ProblemId, code: &str, language: Language) -> Result<JudgeResult>;
    /// Every test, hidden ones included. Needs a signed-in user.
    async fn submit(
        &self,
        problem: ProblemId,
        code: &str,
        language: Language,
    ) -> Result<JudgeResult>;
}

impl Session {
    async fn judge(&self, path: &str, body: &RunRequest<'_>) -> Result<JudgeResult> {
        let url = self.url(path)?;
        self.send(self.client.post(url).json(body)).await
    }
}

#[async_trait(?Send)]
impl Judge for Session {
    async fn run(&self, problem: ProblemId, code: &str, language: Language) -> Result<JudgeResult> {
        info!("Running problem {} in {}", problem, language);
        self.judge(
            "compile_problem",
            &RunRequest {
                problem_id: problem,
                code,
                language,
            },
        )
        .await
    }
    async fn submit(
        &self,
        problem: ProblemId,
        code: &str,
        language: Language,
    ) -> Result<JudgeResult> {
        self.require_token()?;
        info!("Submitting problem {} in {}", problem, language);
        self.judge(
            "submissions/submit",
            &RunRequest {
                problem_id: problem,
                code,
                language,
            },
        )
        .await
    }
}

#[async_trait(?Send)]
impl<T: Judge + ?Sized> Judge for std::rc::Rc<T> {
    async fn run(&self, problem: ProblemId, code: &str, language: Language) -> Result<JudgeResult> {
        (**self).run(problem, code, language).await
    }
    async fn submit(
        &self,
        problem: ProblemId,
        code: &str,
        language: Language,
    ) -> Result<JudgeResult> {
        (**self).submit(problem, code, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::stub::Stub,
        credential::{Credentials, MemoryStore},
    };
    use reqwest::StatusCode;

    fn signed_in() -> Credentials {
        let c = Credentials::new(MemoryStore::new());
        c.set_token("tok").unwrap();
        c
    }

    #[tokio::test]
    async fn judge_requests_are_sent_once() {
        let stub = Stub::start(500, r#"{"detail": "judge crashed"}"#).await;
        let s = stub.session(signed_in());

        let err = s.submit(3, "print(1)", Language::Python).await.unwrap_err();
        assert_eq!(stub.requests().len(), 1);
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.description(), Some("judge crashed"));
        assert!(err.to_string().ends_with("judge crashed"));

        s.run(3, "print(1)", Language::Python).await.unwrap_err();
        let requests = stub.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("POST /submissions/submit "));
        assert!(requests[1].starts_with("POST /compile_problem "));
    }

    #[tokio::test]
    async fn run_posts_code_and_language() {
        let stub = Stub::start(
            200,
            r#"{"message": "Done", "total_tests": 1, "passed_tests": 1, "test_results": []}"#,
        )
        .await;
        let s = stub.session(Credentials::new(MemoryStore::new()));
        let result = s.run(3, "int main() {}", Language::Cpp).await.unwrap();
        assert!(result.all_passed());
        let request = &stub.requests()[0];
        assert!(request.contains(r#""problem_id":3"#));
        assert!(request.contains(r#""language":"cpp""#));
        assert!(request.contains(r#""code":"int main() {}""#));
    }

    #[tokio::test]
    async fn submit_without_token_stays_offline() {
        let stub = Stub::start(200, "{}").await;
        let s = stub.session(Credentials::new(MemoryStore::new()));
        let err = s.submit(3, "x", Language::C).await.unwrap_err();
        assert!(err.is_auth());
        assert!(stub.requests().is_empty());
    }
}
