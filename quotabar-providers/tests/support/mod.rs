//! In-memory management API for fetcher tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use quotabar_core::{AntigravityAccount, CodexAccount, CredentialRecord, ProviderAccount};
use quotabar_fetch::{ApiCallRequest, ApiCallResponse, FetchError, ManagementApi};
use serde_json::Value;

/// Scripted outcome of one relayed call.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Relayed response with an upstream status and a text body.
    Upstream(u16, String),
    /// Relayed response with a structured body.
    Structured(u16, Value),
    /// Management API timed out.
    Timeout,
    /// Management API answered with a non-2xx status.
    ManagementStatus(u16, String),
}

impl Reply {
    /// 200 with a JSON body.
    pub fn json(value: &Value) -> Self {
        Self::Upstream(200, value.to_string())
    }

    fn into_result(self) -> Result<ApiCallResponse, FetchError> {
        match self {
            Self::Upstream(code, body) => Ok(ApiCallResponse::new(code, body)),
            Self::Structured(code, body) => Ok(ApiCallResponse {
                status_code: code,
                header: Value::Null,
                body,
            }),
            Self::Timeout => Err(FetchError::Timeout),
            Self::ManagementStatus(code, body) => Err(FetchError::Status { code, body }),
        }
    }
}

/// Replies per upstream URL, consumed in order, with every request recorded.
#[derive(Default)]
pub struct ScriptedApi {
    records: Vec<CredentialRecord>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<ApiCallRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: Vec<CredentialRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn reply(self, url: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<ApiCallRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }
}

#[async_trait]
impl ManagementApi for ScriptedApi {
    async fn list_credentials(&self) -> Result<Vec<CredentialRecord>, FetchError> {
        Ok(self.records.clone())
    }

    async fn api_call(&self, request: &ApiCallRequest) -> Result<ApiCallResponse, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&request.url)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(reply) => reply.into_result(),
            None => Ok(ApiCallResponse::new(404, "")),
        }
    }
}

pub fn codex_record(auth_index: &str, account_id: &str, email: &str) -> CredentialRecord {
    CredentialRecord::new(
        format!("codex-{email}.json"),
        ProviderAccount::Codex(CodexAccount {
            chatgpt_account_id: account_id.to_string(),
            plan_type: "plus".to_string(),
        }),
    )
    .with_auth_index(auth_index)
    .with_email(email)
}

pub fn antigravity_record(auth_index: &str, project_id: &str, email: &str) -> CredentialRecord {
    CredentialRecord::new(
        format!("antigravity-{email}.json"),
        ProviderAccount::Antigravity(AntigravityAccount {
            project_id: project_id.to_string(),
        }),
    )
    .with_auth_index(auth_index)
    .with_email(email)
}
