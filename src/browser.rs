//! Browser Adapters
//!
//! `fetch` transport and `localStorage` storage for the core ports.

use async_trait::async_trait;
use kanban_core::storage::KeyValueStorage;
use kanban_core::transport::{ApiRequest, ApiResponse, HttpTransport};
use kanban_core::{ApiError, ApiResult, StorageError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// Readable text for a thrown JS value
fn js_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn transport_error(err: JsValue) -> ApiError {
    ApiError::transport(js_message(&err))
}

/// `HttpTransport` over `window.fetch`, CORS mode, JSON bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let window = web_sys::window().ok_or_else(|| ApiError::transport("no window"))?;

        let headers = Headers::new().map_err(transport_error)?;
        headers.set("Content-Type", "application/json").map_err(transport_error)?;
        if let Some(token) = &request.bearer {
            headers
                .set("Authorization", &format!("Bearer {}", token))
                .map_err(transport_error)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);
        init.set_headers(&headers);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let req = Request::new_with_str_and_init(&request.url, &init).map_err(transport_error)?;
        let value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(transport_error)?;
        let resp: Response = value.dyn_into().map_err(transport_error)?;
        let text = JsFuture::from(resp.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        Ok(ApiResponse::new(resp.status(), text.as_string().unwrap_or_default()))
    }
}

/// `KeyValueStorage` over `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

fn storage_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(js_message(&err))
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local()?.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local()?.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local()?.remove_item(key).map_err(storage_error)
    }
}
