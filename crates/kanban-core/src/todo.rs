//! Todo REST Client
//!
//! Wire types for the remote todo list plus the `TodoStore` port and its
//! REST implementation.

use async_trait::async_trait;
use log::{debug, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::encode_column;
use crate::column::ColumnId;
use crate::error::{ApiError, ApiResult};
use crate::storage::{KeyValueStorage, TOKEN_KEY};
use crate::transport::{ApiRequest, HttpTransport, Method};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

const LIST_FAILED: &str = "Error al obtener los todos";
const CREATE_FAILED: &str = "Error al registrar el todo";
const UPDATE_FAILED: &str = "Error al actualizar el todo";
const DELETE_FAILED: &str = "Error al eliminar el todo";
const DELETE_ALL_FAILED: &str = "Error al eliminar todos los todos";

/// Todo item as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Textual status, e.g. "Pendiente"
    #[serde(default, deserialize_with = "scalar_string")]
    pub completed: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Accepts strings, numbers, booleans and null as text.
/// Older items stored `completed` as a boolean.
pub(crate) fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected a scalar, got {other}"))),
    }
}

/// Body for create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoFields {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: String,
    pub category: String,
}

impl TodoFields {
    pub fn new(title: impl Into<String>, description: Option<String>, column: ColumnId) -> Self {
        let encoded = encode_column(column);
        Self {
            title: title.into(),
            description,
            completed: encoded.completed,
            category: encoded.category,
        }
    }
}

/// Item source and mutator
#[async_trait(?Send)]
pub trait TodoStore: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<TodoItem>>;
    async fn create(&self, fields: &TodoFields) -> ApiResult<TodoItem>;
    async fn update(&self, id: &str, fields: &TodoFields) -> ApiResult<TodoItem>;
    async fn delete(&self, id: &str) -> ApiResult<()>;
    async fn delete_all(&self) -> ApiResult<()>;
}

/// `TodoStore` over the REST API. The token is read from storage per call.
pub struct RemoteTodoStore<T, S> {
    transport: T,
    base_url: String,
    tokens: S,
}

impl<T: HttpTransport, S: KeyValueStorage> RemoteTodoStore<T, S> {
    pub fn new(transport: T, base_url: impl Into<String>, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            tokens,
        }
    }

    fn token(&self) -> Option<String> {
        self.tokens.get(TOKEN_KEY).unwrap_or_else(|e| {
            warn!("[API] token unavailable: {}", e);
            None
        })
    }

    fn request(&self, method: Method, id: Option<&str>) -> ApiRequest {
        let url = match id {
            Some(id) => format!("{}/todo/{}", self.base_url, utf8_percent_encode(id, PATH_SEGMENT)),
            None => format!("{}/todo", self.base_url),
        };
        debug!("[API] {} {}", method.as_str(), url);
        ApiRequest::new(method, url).bearer(self.token())
    }
}

#[async_trait(?Send)]
impl<T, S> TodoStore for RemoteTodoStore<T, S>
where
    T: HttpTransport + Send + Sync,
    S: KeyValueStorage,
{
    async fn list(&self) -> ApiResult<Vec<TodoItem>> {
        let resp = self.transport.send(self.request(Method::Get, None)).await?;
        if !resp.is_success() {
            return Err(resp.into_error(LIST_FAILED));
        }
        resp.json()
    }

    async fn create(&self, fields: &TodoFields) -> ApiResult<TodoItem> {
        let req = self.request(Method::Post, None).json(fields)?;
        let resp = self.transport.send(req).await?;
        if !resp.is_success() {
            return Err(resp.into_error(CREATE_FAILED));
        }
        resp.json()
    }

    async fn update(&self, id: &str, fields: &TodoFields) -> ApiResult<TodoItem> {
        let req = self.request(Method::Put, Some(id)).json(fields)?;
        let resp = self.transport.send(req).await?;
        if !resp.is_success() {
            return Err(resp.into_error(UPDATE_FAILED));
        }
        resp.json()
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let resp = self.transport.send(self.request(Method::Delete, Some(id))).await?;
        if !resp.is_success() {
            return Err(ApiError::new(resp.status, DELETE_FAILED));
        }
        Ok(())
    }

    async fn delete_all(&self) -> ApiResult<()> {
        let resp = self.transport.send(self.request(Method::Delete, None)).await?;
        if !resp.is_success() {
            return Err(ApiError::new(resp.status, DELETE_ALL_FAILED));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use crate::testing::ScriptedTransport;
    use crate::transport::ApiResponse;

    fn store(transport: ScriptedTransport) -> RemoteTodoStore<ScriptedTransport, MemoryStorage> {
        let tokens = MemoryStorage::default();
        tokens.set(TOKEN_KEY, "jwt-123").unwrap();
        RemoteTodoStore::new(transport, "http://api.test/", tokens)
    }

    #[test]
    fn test_item_accepts_legacy_shapes() {
        let item: TodoItem = serde_json::from_str(
            r#"{"id": 42, "title": "Comprar pan", "completed": false, "category": null}"#,
        )
        .unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.completed, "false");
        assert_eq!(item.category, "");
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_fields_encode_column() {
        let fields = TodoFields::new("Revisar PR", None, ColumnId::EnProceso);
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["completed"], "En proceso");
        assert_eq!(json["category"], "En proceso");
        assert!(json.get("description").is_none());
    }

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let transport = ScriptedTransport::new(vec![Ok(ApiResponse::new(
            200,
            r#"[{"id":"a","title":"Uno","completed":"Pendiente","category":""}]"#,
        ))]);
        let store = store(transport.clone());

        let items = store.list().await.expect("list failed");
        assert_eq!(items.len(), 1);

        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].url, "http://api.test/todo");
        assert_eq!(sent[0].bearer.as_deref(), Some("jwt-123"));
    }

    #[tokio::test]
    async fn test_update_encodes_id_and_body() {
        let transport = ScriptedTransport::new(vec![Ok(ApiResponse::new(
            200,
            r#"{"id":"a b","title":"Uno","completed":"Completados","category":"Completados"}"#,
        ))]);
        let store = store(transport.clone());

        let fields = TodoFields::new("Uno", None, ColumnId::Completados);
        store.update("a b", &fields).await.expect("update failed");

        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "http://api.test/todo/a%20b");
        let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["category"], "Completados");
    }

    #[tokio::test]
    async fn test_failures_use_default_messages() {
        let transport = ScriptedTransport::new(vec![
            Ok(ApiResponse::new(500, "")),
            Ok(ApiResponse::new(404, r#"{"message":"No existe"}"#)),
            Err(ApiError::transport("Failed to fetch")),
        ]);
        let store = store(transport);

        let err = store.list().await.unwrap_err();
        assert_eq!(err, ApiError::new(500, LIST_FAILED));

        let err = store.delete("x").await.unwrap_err();
        assert_eq!(err, ApiError::new(404, DELETE_FAILED));

        let err = store.delete_all().await.unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "Failed to fetch");
    }
}
