//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::todo::{TodoFields, TodoItem, TodoStore};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

/// Replays canned responses in order and records what was sent
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<ApiResult<ApiResponse>>>>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResult<ApiResponse>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            sent: Arc::default(),
        }
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.sent.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted response")))
    }
}

/// Store whose every call fails with a transport error
pub struct FailingStore;

#[async_trait(?Send)]
impl TodoStore for FailingStore {
    async fn list(&self) -> ApiResult<Vec<TodoItem>> {
        Err(ApiError::transport("Failed to fetch"))
    }

    async fn create(&self, _fields: &TodoFields) -> ApiResult<TodoItem> {
        Err(ApiError::transport("Failed to fetch"))
    }

    async fn update(&self, _id: &str, _fields: &TodoFields) -> ApiResult<TodoItem> {
        Err(ApiError::transport("Failed to fetch"))
    }

    async fn delete(&self, _id: &str) -> ApiResult<()> {
        Err(ApiError::transport("Failed to fetch"))
    }

    async fn delete_all(&self) -> ApiResult<()> {
        Err(ApiError::transport("Failed to fetch"))
    }
}

pub fn item(id: &str, title: &str, completed: &str, category: &str) -> TodoItem {
    TodoItem {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        completed: completed.to_string(),
        category: category.to_string(),
        user_id: None,
    }
}
