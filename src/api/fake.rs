//! In-memory backend for controller tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::endpoints::{self, SummaryEndpoint, SummaryQuery};
use super::{FinanceApi, SessionInfo};
use crate::error::{AppError, AppResult};
use crate::model::record::{Record, RecordKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    List(RecordKind),
    Create(RecordKind, Map<String, Value>),
    Update(RecordKind, i64, Map<String, Value>),
    Delete(RecordKind, i64),
    Summary(String),
    Login(String),
    Logout,
    Status,
}

#[derive(Default)]
pub struct FakeApi {
    pub records: RefCell<HashMap<RecordKind, Vec<Record>>>,
    pub summaries: RefCell<HashMap<String, Value>>,
    /// Errors returned instead of a response, keyed by request path.
    pub failures: RefCell<HashMap<String, AppError>>,
    pub calls: RefCell<Vec<Call>>,
    pub session: RefCell<Option<AppResult<SessionInfo>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, kind: RecordKind, rows: Vec<Value>) -> Self {
        self.records
            .borrow_mut()
            .insert(kind, rows.into_iter().map(Record::from).collect());
        self
    }

    pub fn with_summary(self, path: &str, value: Value) -> Self {
        self.summaries.borrow_mut().insert(path.to_string(), value);
        self
    }

    pub fn fail(&self, path: &str, err: AppError) {
        self.failures.borrow_mut().insert(path.to_string(), err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::List(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn failure(&self, path: &str) -> AppResult<()> {
        match self.failures.borrow().get(path) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl FinanceApi for FakeApi {
    async fn list(&self, kind: RecordKind) -> AppResult<Vec<Record>> {
        self.record(Call::List(kind));
        self.failure(&endpoints::collection(kind))?;
        Ok(self.records.borrow().get(&kind).cloned().unwrap_or_default())
    }

    async fn create(&self, kind: RecordKind, body: &Map<String, Value>) -> AppResult<()> {
        self.record(Call::Create(kind, body.clone()));
        self.failure(&endpoints::collection(kind))?;
        let mut row = body.clone();
        let mut records = self.records.borrow_mut();
        let rows = records.entry(kind).or_default();
        row.insert("doc_id".into(), Value::from(rows.len() as i64 + 1));
        rows.push(Record(row));
        Ok(())
    }

    async fn update(&self, kind: RecordKind, id: i64, body: &Map<String, Value>) -> AppResult<()> {
        self.record(Call::Update(kind, id, body.clone()));
        self.failure(&endpoints::item(kind, id))?;
        let mut records = self.records.borrow_mut();
        let row = records
            .get_mut(&kind)
            .and_then(|rows| rows.iter_mut().find(|r| r.id() == Some(id)))
            .ok_or_else(|| AppError::http(404, "Not Found", Some(&serde_json::json!({"detail": "Entry not found"}))))?;
        for (k, v) in body {
            row.0.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    async fn delete(&self, kind: RecordKind, id: i64) -> AppResult<()> {
        self.record(Call::Delete(kind, id));
        self.failure(&endpoints::item(kind, id))?;
        if let Some(rows) = self.records.borrow_mut().get_mut(&kind) {
            rows.retain(|r| r.id() != Some(id));
        }
        Ok(())
    }

    async fn summary(&self, endpoint: SummaryEndpoint, query: &SummaryQuery) -> AppResult<Value> {
        let path = endpoints::summary(endpoint, query);
        self.record(Call::Summary(path.clone()));
        self.failure(&path)?;
        Ok(self
            .summaries
            .borrow()
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    async fn login(&self, username: &str, _password: &str) -> AppResult<()> {
        self.record(Call::Login(username.to_string()));
        self.failure(endpoints::LOGIN_TOKEN)
    }

    async fn logout(&self) -> AppResult<()> {
        self.record(Call::Logout);
        self.failure(endpoints::LOGOUT)
    }

    async fn session_status(&self) -> AppResult<SessionInfo> {
        self.record(Call::Status);
        self.session
            .borrow()
            .clone()
            .unwrap_or_else(|| Ok(SessionInfo::default()))
    }
}
