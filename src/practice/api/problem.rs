use super::{Result, Session};
use crate::{
    config::problem::{TAG_LIMIT, TEMPLATE_PATH},
    language::Language,
    schema::{Constraint, Problem, ProblemId, ProblemPage, Tag, TestCase, Template},
};
use futures::join;
use log::warn;

/// Everything the problem page shows next to the editor.
pub struct ProblemDetail {
    pub problem: Problem,
    pub test_cases: Vec<TestCase>,
    pub tags: Vec<Tag>,
    pub constraints: Vec<Constraint>,
}

impl Session {
    pub async fn problems(
        &self,
        skip: u32,
        limit: u32,
        difficulty: Option<&str>,
    ) -> Result<Vec<Problem>> {
        let url = self.url("problems")?;
        let page: ProblemPage = self
            .fetch(|| {
                let request = self
                    .client
                    .get(url.clone())
                    .query(&[("skip", skip), ("limit", limit)]);
                match difficulty {
                    Some(d) => request.query(&[("difficulty", d)]),
                    None => request,
                }
            })
            .await?;
        Ok(page.into_problems())
    }
    pub async fn problem(&self, id: ProblemId) -> Result<Problem> {
        let url = self.url(&format!("problems/{}", id))?;
        self.fetch(|| self.client.get(url.clone())).await
    }
    pub async fn test_cases(&self, id: ProblemId, include_hidden: bool) -> Result<Vec<TestCase>> {
        let url = self.url(&format!("problems/{}/testcases", id))?;
        self.fetch(|| {
            self.client
                .get(url.clone())
                .query(&[("include_hidden", include_hidden)])
        })
        .await
    }
    pub async fn template(&self, id: ProblemId, language: Language) -> Result<Template> {
        let url = self.url(&format!("problems/{}/{}", id, TEMPLATE_PATH))?;
        self.fetch(|| {
            self.client
                .get(url.clone())
                .query(&[("language", language.id())])
        })
        .await
    }
    /// Every tag known to the backend.
    pub async fn all_tags(&self) -> Result<Vec<Tag>> {
        let url = self.url("tags")?;
        self.fetch(|| {
            self.client
                .get(url.clone())
                .query(&[("skip", 0), ("limit", TAG_LIMIT)])
        })
        .await
    }
    pub async fn problems_by_tag(&self, tag: u64) -> Result<Vec<Problem>> {
        let url = self.url(&format!("tags/tag/{}/problems", tag))?;
        let page: ProblemPage = self.fetch(|| self.client.get(url.clone())).await?;
        Ok(page.into_problems())
    }
    pub async fn tags(&self, id: ProblemId) -> Result<Vec<Tag>> {
        let url = self.url(&format!("tags/problem/{}", id))?;
        self.fetch(|| self.client.get(url.clone())).await
    }
    pub async fn constraints(&self, id: ProblemId) -> Result<Vec<Constraint>> {
        let url = self.url(&format!("constraints/problem/{}", id))?;
        let mut list: Vec<Constraint> = self.fetch(|| self.client.get(url.clone())).await?;
        list.sort_by_key(|c| c.order);
        Ok(list)
    }

    /// Loads the problem with its sample tests, tags and constraints in
    /// parallel. Tags and constraints are decoration: failing to load them
    /// leaves the lists empty.
    pub async fn detail(&self, id: ProblemId) -> Result<ProblemDetail> {
        let (problem, test_cases, tags, constraints) = join!(
            self.problem(id),
            self.test_cases(id, false),
            self.tags(id),
            self.constraints(id)
        );
        Ok(ProblemDetail {
            problem: problem?,
            test_cases: test_cases?,
            tags: tags.unwrap_or_else(|e| {
                warn!("Tags for problem {}: {}", id, e);
                Vec::new()
            }),
            constraints: constraints.unwrap_or_else(|e| {
                warn!("Constraints for problem {}: {}", id, e);
                Vec::new()
            }),
        })
    }
}
