//! Authentication API
//!
//! Login, register and token verification against the REST API.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::todo::scalar_string;
use crate::transport::{ApiRequest, HttpTransport, Method};
use crate::validation::Credentials;

const LOGIN_FAILED: &str = "Credenciales inválidas";
const REGISTER_FAILED: &str = "Error al registrar el usuario";
const TOKEN_INVALID: &str = "Token inválido";

/// Identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Deserialize)]
struct VerifyResponse {
    user: AuthUser,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Clone)]
pub struct AuthApi<T> {
    transport: T,
    base_url: String,
}

impl<T: HttpTransport> AuthApi<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { transport, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/{}", self.base_url, path)
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let req = ApiRequest::new(Method::Post, self.url("login")).json(&body)?;
        let resp = self.transport.send(req).await?;
        if !resp.is_success() {
            return Err(resp.into_error(LOGIN_FAILED));
        }
        resp.json()
    }

    pub async fn register(&self, credentials: &Credentials) -> ApiResult<()> {
        let body = RegisterBody {
            email: &credentials.email,
            password: &credentials.password,
            name: &credentials.name,
        };
        let req = ApiRequest::new(Method::Post, self.url("register")).json(&body)?;
        let resp = self.transport.send(req).await?;
        if !resp.is_success() {
            return Err(resp.into_error(REGISTER_FAILED));
        }
        debug!("[AUTH] registered {}", credentials.email);
        Ok(())
    }

    pub async fn verify(&self, token: &str) -> ApiResult<AuthUser> {
        let req = ApiRequest::new(Method::Get, self.url("verify")).bearer(Some(token.to_string()));
        let resp = self.transport.send(req).await?;
        if !resp.is_success() {
            return Err(ApiError::new(resp.status, TOKEN_INVALID));
        }
        Ok(resp.json::<VerifyResponse>()?.user)
    }
}
