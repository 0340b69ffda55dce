//! User Notices
//!
//! Transient messages shown as toasts. Every recoverable failure ends up
//! here instead of propagating.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// User-facing message texts
pub mod messages {
    pub const BOARD_LOAD_FAILED: &str = "No se pudieron cargar las tareas";
    pub const TASK_CREATED: &str = "Tarea creada";
    pub const TASK_CREATE_FAILED: &str = "Error al crear la tarea";
    pub const TASK_DELETED: &str = "Tarea eliminada";
    pub const TASK_DELETE_FAILED: &str = "Error al eliminar la tarea";
    pub const TASK_MOVE_FAILED: &str = "Error al mover la tarea";
    pub const BOARD_CLEARED: &str = "Tablero vaciado";
    pub const BOARD_CLEAR_FAILED: &str = "Error al vaciar el tablero";
    pub const WELCOME: &str = "¡Bienvenido!";
    pub const ACCOUNT_CREATED: &str = "Cuenta creada correctamente";
    pub const PROFILE_SAVED: &str = "Perfil actualizado (localmente)";
    pub const PROFILE_SAVE_FAILED: &str = "Error al guardar el perfil";
    pub const PROFILE_LOAD_FAILED: &str = "Error al cargar el perfil local";
}
