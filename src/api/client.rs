use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::{Map, Value};
use web_sys::RequestCredentials;

use super::endpoints::{self, SummaryEndpoint, SummaryQuery};
use super::{FinanceApi, SessionInfo};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::model::record::{Record, RecordKind};

/// Browser client. Every request carries the session cookie.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpClient {
    config: AppConfig,
}

impl HttpClient {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(AppConfig::load())
    }
}

/// Turns a transport failure or a non-2xx response into an [`AppError`].
async fn check(result: Result<Response, gloo_net::Error>) -> AppResult<Response> {
    let resp = result.map_err(|e| AppError::Network(e.to_string()))?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let status_text = resp.status_text();
    let body = resp.json::<Value>().await.ok();
    log::warn!("request failed with {} {}", status, status_text);
    Err(AppError::http(status, status_text, body.as_ref()))
}

async fn read_json<T: serde::de::DeserializeOwned>(resp: Response) -> AppResult<T> {
    resp.json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

fn build_error(e: gloo_net::Error) -> AppError {
    AppError::Decode(format!("could not build request: {}", e))
}

#[async_trait(?Send)]
impl FinanceApi for HttpClient {
    async fn list(&self, kind: RecordKind) -> AppResult<Vec<Record>> {
        let url = self.url(&endpoints::collection(kind));
        log::debug!("GET {}", url);
        let resp = check(
            Request::get(&url)
                .credentials(RequestCredentials::Include)
                .send()
                .await,
        )
        .await?;
        read_json(resp).await
    }

    async fn create(&self, kind: RecordKind, body: &Map<String, Value>) -> AppResult<()> {
        let url = self.url(&endpoints::collection(kind));
        log::debug!("POST {}", url);
        let request = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .json(body)
            .map_err(build_error)?;
        check(request.send().await).await?;
        Ok(())
    }

    async fn update(&self, kind: RecordKind, id: i64, body: &Map<String, Value>) -> AppResult<()> {
        let url = self.url(&endpoints::item(kind, id));
        log::debug!("PUT {}", url);
        let request = Request::put(&url)
            .credentials(RequestCredentials::Include)
            .json(body)
            .map_err(build_error)?;
        check(request.send().await).await?;
        Ok(())
    }

    async fn delete(&self, kind: RecordKind, id: i64) -> AppResult<()> {
        let url = self.url(&endpoints::item(kind, id));
        log::debug!("DELETE {}", url);
        check(
            Request::delete(&url)
                .credentials(RequestCredentials::Include)
                .send()
                .await,
        )
        .await?;
        Ok(())
    }

    async fn summary(&self, endpoint: SummaryEndpoint, query: &SummaryQuery) -> AppResult<Value> {
        let url = self.url(&endpoints::summary(endpoint, query));
        log::debug!("GET {}", url);
        let resp = check(
            Request::get(&url)
                .credentials(RequestCredentials::Include)
                .send()
                .await,
        )
        .await?;
        read_json(resp).await
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        let url = self.url(endpoints::LOGIN_TOKEN);
        let request = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(endpoints::login_form(username, password))
            .map_err(build_error)?;
        check(request.send().await).await?;
        Ok(())
    }

    async fn logout(&self) -> AppResult<()> {
        let url = self.url(endpoints::LOGOUT);
        check(
            Request::post(&url)
                .credentials(RequestCredentials::Include)
                .header("Content-Type", "application/json")
                .send()
                .await,
        )
        .await?;
        Ok(())
    }

    async fn session_status(&self) -> AppResult<SessionInfo> {
        let url = self.url(endpoints::LOGIN_STATUS);
        let resp = check(
            Request::get(&url)
                .credentials(RequestCredentials::Include)
                .send()
                .await,
        )
        .await?;
        // A bare 200 without a body still means the cookie is valid.
        Ok(resp.json::<SessionInfo>().await.unwrap_or_default())
    }
}
