//! Access to the finance backend.
//!
//! Screens talk to the backend only through [`FinanceApi`], so every
//! controller can be exercised against an in-memory double.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::model::record::{Record, RecordKind};

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub mod fake;

pub use client::HttpClient;
pub use endpoints::{SummaryEndpoint, SummaryQuery};

/// Body of a successful session check.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub username: Option<String>,
}

#[async_trait(?Send)]
pub trait FinanceApi {
    /// `GET /{kind}/`: the whole collection, unfiltered.
    async fn list(&self, kind: RecordKind) -> AppResult<Vec<Record>>;

    async fn create(&self, kind: RecordKind, body: &Map<String, Value>) -> AppResult<()>;

    async fn update(&self, kind: RecordKind, id: i64, body: &Map<String, Value>) -> AppResult<()>;

    async fn delete(&self, kind: RecordKind, id: i64) -> AppResult<()>;

    /// Raw aggregate JSON; callers decide what an empty payload means.
    async fn summary(&self, endpoint: SummaryEndpoint, query: &SummaryQuery) -> AppResult<Value>;

    async fn login(&self, username: &str, password: &str) -> AppResult<()>;

    async fn logout(&self) -> AppResult<()>;

    async fn session_status(&self) -> AppResult<SessionInfo>;
}
