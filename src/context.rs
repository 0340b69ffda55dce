//! Application Context
//!
//! Services and session shared via Leptos Context API.

use std::sync::Arc;

use kanban_core::auth::AuthApi;
use kanban_core::memory::{MemoryStorage, MemoryTodoStore};
use kanban_core::profile::{ProfileStore, StoredProfiles};
use kanban_core::todo::{RemoteTodoStore, TodoStore};
use kanban_core::{Authenticator, BoardService, CardId, DropTarget, SessionState};
use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use crate::browser::{BrowserStorage, FetchTransport};
use crate::config::{AppConfig, StoreMode};

pub type SessionAuth = Authenticator<FetchTransport, BrowserStorage>;

/// Board drag-and-drop signals, created once by `App`
pub type BoardDnd = DndSignals<CardId, DropTarget>;

/// App-wide services provided via context
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    /// Current session - Loading until the stored token is checked
    pub session: RwSignal<SessionState>,
    pub board: BoardService,
    pub auth: SessionAuth,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppContext {
    /// Wire the ports for `config.store`
    pub fn new(config: AppConfig) -> Self {
        let (store, profiles): (Arc<dyn TodoStore>, Arc<dyn ProfileStore>) = match config.store {
            StoreMode::Remote => (
                Arc::new(RemoteTodoStore::new(FetchTransport, config.api_url.clone(), BrowserStorage)),
                Arc::new(StoredProfiles::new(BrowserStorage)),
            ),
            StoreMode::Memory => (
                Arc::new(MemoryTodoStore::default()),
                Arc::new(StoredProfiles::new(MemoryStorage::default())),
            ),
        };
        log::info!("[APP] store={:?} api={}", config.store, config.api_url);
        let auth = Authenticator::new(AuthApi::new(FetchTransport, config.api_url.clone()), BrowserStorage);
        Self {
            config,
            session: RwSignal::new(SessionState::Loading),
            board: BoardService::new(store),
            auth,
            profiles,
        }
    }

    pub fn toast_ms(&self) -> u32 {
        self.config.toast_ms
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

pub fn use_board_dnd() -> BoardDnd {
    expect_context::<BoardDnd>()
}
