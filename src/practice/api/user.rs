use super::{Result, Session};
use crate::schema::UserStats;

impl Session {
    pub async fn stats(&self) -> Result<UserStats> {
        self.require_token()?;
        let url = self.url("users/me/stats")?;
        self.fetch(|| self.client.get(url.clone())).await
    }
}
