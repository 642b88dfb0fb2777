//! Hosted leaderboard client.
//!
//! Talks to a PostgREST-style record store: one table, rows keyed by
//! username. Writes are upsert-by-username with read-then-write
//! semantics -- there is no compare-and-swap, so two devices racing on
//! the same user can lose an update, matching the rest of the design.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{block_on, resolve_key};
use crate::error::{CoreError, Result, ServiceError, ValidationError};
use crate::storage::LeaderboardConfig;

const SERVICE: &str = "leaderboard";
const KEYRING_KEY: &str = "leaderboard_key";
const ENV_VAR: &str = "KOALA_LEADERBOARD_KEY";

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user: String,
    pub score: i64,
}

#[derive(Debug)]
pub struct LeaderboardClient {
    base_url: String,
    table: String,
    key: String,
}

impl LeaderboardClient {
    /// Resolve the service key from the keyring (`leaderboard_key`) or
    /// `KOALA_LEADERBOARD_KEY`. Requires a configured base URL.
    pub fn new(config: &LeaderboardConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CoreError::Custom(
                "Leaderboard base URL not configured. Set leaderboard.base_url first.".into(),
            ));
        }
        let key = resolve_key(KEYRING_KEY, ENV_VAR).ok_or(ValidationError::MissingApiKey {
            service: SERVICE,
            env_var: ENV_VAR,
        })?;
        Ok(Self::with_key(config, key))
    }

    /// Build with an explicit key (tests, embedding).
    pub fn with_key(config: &LeaderboardConfig, key: impl Into<String>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
            key: key.into(),
        }
    }

    /// Store the service key in the OS keyring.
    pub fn store_key(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        super::keyring_store::set(KEYRING_KEY, key)
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let resp = block_on(
            SERVICE,
            builder
                .header("apikey", &self.key)
                .bearer_auth(&self.key)
                .send(),
        )?
        .map_err(|e| ServiceError::RequestFailed {
            service: SERVICE,
            message: e.to_string(),
        })?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = block_on(SERVICE, resp.text())?.unwrap_or_default();
            Err(ServiceError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            })
        }
    }

    fn rows(&self, resp: reqwest::Response) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        block_on(SERVICE, resp.json::<Vec<LeaderboardEntry>>())?.map_err(|e| {
            ServiceError::UnexpectedResponse {
                service: SERVICE,
                message: e.to_string(),
            }
        })
    }

    /// Fetch the row for one username, if present.
    fn find_user(&self, username: &str) -> Result<Option<LeaderboardEntry>, ServiceError> {
        let url = format!(
            "{}?user=eq.{}&select=*",
            self.endpoint(),
            urlencoding::encode(username)
        );
        let resp = self.request(Client::new().get(&url))?;
        Ok(self.rows(resp)?.into_iter().next())
    }

    /// Update the user's row when it exists, insert it otherwise.
    pub fn upsert_score(&self, username: &str, score: i64) -> Result<(), ServiceError> {
        match self.find_user(username)? {
            Some(_) => {
                let url = format!(
                    "{}?user=eq.{}",
                    self.endpoint(),
                    urlencoding::encode(username)
                );
                self.request(Client::new().patch(&url).json(&json!({ "score": score })))?;
            }
            None => {
                let body = json!([{ "user": username, "score": score }]);
                self.request(Client::new().post(self.endpoint()).json(&body))?;
            }
        }
        Ok(())
    }

    /// Top ten rows by score, descending.
    pub fn top10(&self) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        let url = format!("{}?select=*&order=score.desc&limit=10", self.endpoint());
        let resp = self.request(Client::new().get(&url))?;
        self.rows(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::Server) -> LeaderboardClient {
        let config = LeaderboardConfig {
            base_url: server.url(),
            table: "leaderboard".into(),
        };
        LeaderboardClient::with_key(&config, "anon-key")
    }

    #[test]
    fn upsert_patches_when_user_exists() {
        let mut server = mockito::Server::new();
        let select = server
            .mock("GET", "/rest/v1/leaderboard")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("user".into(), "eq.koala".into()),
                Matcher::UrlEncoded("select".into(), "*".into()),
            ]))
            .with_body(r#"[{"user":"koala","score":3}]"#)
            .create();
        let update = server
            .mock("PATCH", "/rest/v1/leaderboard")
            .match_query(Matcher::UrlEncoded("user".into(), "eq.koala".into()))
            .match_body(Matcher::Json(serde_json::json!({ "score": 7 })))
            .with_body("[]")
            .create();

        client(&server).upsert_score("koala", 7).unwrap();
        select.assert();
        update.assert();
    }

    #[test]
    fn upsert_inserts_when_user_absent() {
        let mut server = mockito::Server::new();
        let _select = server
            .mock("GET", "/rest/v1/leaderboard")
            .match_query(Matcher::Any)
            .with_body("[]")
            .create();
        let insert = server
            .mock("POST", "/rest/v1/leaderboard")
            .match_body(Matcher::Json(serde_json::json!([
                { "user": "newbie", "score": 1 }
            ])))
            .with_body("[]")
            .create();

        client(&server).upsert_score("newbie", 1).unwrap();
        insert.assert();
    }

    #[test]
    fn top10_parses_rows_in_order() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/rest/v1/leaderboard")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("order".into(), "score.desc".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_body(r#"[{"user":"a","score":10},{"user":"b","score":5}]"#)
            .create();

        let rows = client(&server).top10().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user, "a");
        assert_eq!(rows[0].score, 10);
    }

    #[test]
    fn http_error_becomes_service_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/rest/v1/leaderboard")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("unauthorized")
            .create();

        let err = client(&server).top10().unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn unconfigured_base_url_is_rejected() {
        let err = LeaderboardClient::new(&LeaderboardConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
