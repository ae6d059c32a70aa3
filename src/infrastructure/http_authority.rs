use crate::config::RemoteConfig;
use crate::domain::services::{AuthorityFuture, RemoteAuthority};
use crate::domain::square::Square;
use crate::domain::state::{BoardState, MoveRequest, MoveResponse};
use crate::error::SyncError;

/// Remote authority reached over `GET /state` and `POST /move`.
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAuthority {
    pub fn new(config: &RemoteConfig) -> Self {
        Self::with_client(&config.base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl RemoteAuthority for HttpAuthority {
    fn fetch_state(&self) -> AuthorityFuture<'_, BoardState> {
        Box::pin(async move {
            let resp = self.client.get(self.url("/state")).send().await?;

            if !resp.status().is_success() {
                return Err(SyncError::Transport(format!(
                    "GET /state returned {}",
                    resp.status()
                )));
            }

            let body = resp.bytes().await?;
            BoardState::from_json(&body)
        })
    }

    fn submit_move<'a>(&'a self, square: Square) -> AuthorityFuture<'a, MoveResponse> {
        Box::pin(async move {
            let resp = self
                .client
                .post(self.url("/move"))
                .json(&MoveRequest { square })
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let reason = resp.text().await.unwrap_or_default();
                return Ok(MoveResponse::Rejected {
                    status: status.as_u16(),
                    reason: reason.trim().to_string(),
                });
            }

            let body = resp.bytes().await?;
            BoardState::from_json(&body).map(MoveResponse::Accepted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let authority = HttpAuthority::with_client("http://localhost:8080/", reqwest::Client::new());
        assert_eq!(authority.base_url(), "http://localhost:8080");
        assert_eq!(authority.url("/state"), "http://localhost:8080/state");
    }
}
