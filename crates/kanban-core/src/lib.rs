//! Kanban Core
//!
//! Platform-free logic behind the kanban front end:
//! - column: the three fixed columns
//! - codec: column <-> remote `completed`/`category` fields
//! - board, card: in-memory board state
//! - reconciler: drag gesture state machine
//! - todo, auth, transport: REST client over an abstract transport
//! - session, profile, storage: user state kept in key-value storage
//! - service: board operations with request sequencing

mod error;
pub mod auth;
pub mod board;
pub mod card;
pub mod codec;
pub mod column;
pub mod memory;
pub mod notice;
pub mod profile;
pub mod reconciler;
pub mod sequence;
pub mod service;
pub mod session;
pub mod storage;
pub mod todo;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod testing;

pub use auth::{AuthApi, AuthUser};
pub use board::BoardState;
pub use card::{Card, CardId};
pub use column::{Column, ColumnId};
pub use error::{ApiError, ApiResult, StorageError};
pub use notice::{Notice, NoticeKind};
pub use reconciler::{CardMove, DragReconciler, DropTarget};
pub use service::{BoardService, LoadResult};
pub use session::{Authenticator, SessionState};
