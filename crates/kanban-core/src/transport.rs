//! HTTP Transport Port
//!
//! Requests are described as plain data and handed to a transport.
//! The browser front end plugs in a `fetch` transport; tests script one.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Outgoing request: JSON body and optional bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let encoded = serde_json::to_string(body).map_err(|e| ApiError::transport(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::transport(e.to_string()))
    }

    /// Error carrying the server's `message` (or `error`) field, else `fallback`
    pub fn into_error(self, fallback: &str) -> ApiError {
        let message = serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        ApiError::new(self.status, message)
    }
}

/// Sends one request. No retries, no timeouts.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_error_prefers_server_message() {
        let resp = ApiResponse::new(400, r#"{"message":"Título requerido"}"#);
        assert_eq!(resp.into_error("Error al registrar el todo"), ApiError::new(400, "Título requerido"));

        let resp = ApiResponse::new(401, r#"{"error":"Usuario no encontrado"}"#);
        assert_eq!(resp.into_error("Credenciales inválidas").message, "Usuario no encontrado");
    }

    #[test]
    fn test_into_error_falls_back() {
        let resp = ApiResponse::new(502, "<html>Bad Gateway</html>");
        assert_eq!(resp.into_error("Error al obtener los todos"), ApiError::new(502, "Error al obtener los todos"));
    }

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(201, "").is_success());
        assert!(!ApiResponse::new(304, "").is_success());
    }
}
