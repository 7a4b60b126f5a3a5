use super::{Result, Session};
use crate::{
    language::Language,
    schema::{AcceptedSubmission, ProblemId},
};
use log::{debug, warn};
use reqwest::StatusCode;

impl Session {
    /// The user's last accepted solution, optionally restricted to one
    /// language. "Not found", "not signed in" and "bad request" all mean
    /// there is nothing to restore.
    pub async fn accepted(
        &self,
        problem: ProblemId,
        language: Option<Language>,
    ) -> Result<Option<AcceptedSubmission>> {
        let url = self.url(&format!("submissions/problem/{}/accepted", problem))?;
        let result: Result<AcceptedSubmission> = self
            .fetch(|| {
                let request = self.client.get(url.clone());
                match language {
                    Some(l) => request.query(&[("language", l.id())]),
                    None => request,
                }
            })
            .await;
        match result {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => {
                debug!("No accepted submission for problem {}", problem);
                Ok(None)
            }
            Err(e) if e.is_auth() || e.status() == Some(StatusCode::BAD_REQUEST) => {
                warn!("Accepted submission lookup for problem {}: {}", problem, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
