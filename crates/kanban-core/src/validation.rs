//! Form Validation
//!
//! Form-level checks for the login and register forms. The first failing
//! rule wins, checked in field order: email, password, name.

use thiserror::Error;

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Only used when registering
    pub name: String,
}

impl Credentials {
    pub fn validate(&self, mode: AuthMode) -> Result<(), ValidationError> {
        if !looks_like_email(&self.email) {
            return Err(ValidationError("Email inválido"));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError("Mínimo 6 caracteres"));
        }
        if mode == AuthMode::Register && self.name.chars().count() < MIN_NAME_CHARS {
            return Err(ValidationError("Nombre requerido"));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
