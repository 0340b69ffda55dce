//! Board Service
//!
//! Remote side of the board: loading, creating, deleting and persisting
//! moves through a `TodoStore`. Failures come back as `Notice`s; callers
//! apply successful results to their `BoardState`.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::board::BoardState;
use crate::card::Card;
use crate::column::ColumnId;
use crate::notice::{messages, Notice};
use crate::reconciler::CardMove;
use crate::sequence::RequestSequencer;
use crate::todo::{TodoFields, TodoStore};

const BOARD_KEY: &str = "board";

/// Outcome of a load that was still current when it finished
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub board: BoardState,
    /// Set when the fetch failed and the board came back empty
    pub notice: Option<Notice>,
}

#[derive(Clone)]
pub struct BoardService {
    store: Arc<dyn TodoStore>,
    sequencer: RequestSequencer,
}

impl BoardService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Fetch all items and bucket them. `None` when a newer load started
    /// while this one was in flight.
    pub async fn load(&self) -> Option<LoadResult> {
        let ticket = self.sequencer.issue(BOARD_KEY);
        let result = self.store.list().await;
        if !self.sequencer.settle(&ticket) {
            debug!("[BOARD] dropping stale load #{}", ticket.seq());
            return None;
        }
        Some(match result {
            Ok(items) => {
                info!("[BOARD] loaded {} items", items.len());
                LoadResult {
                    board: BoardState::from_items(&items),
                    notice: None,
                }
            }
            Err(e) => {
                warn!("[BOARD] load failed: {}", e);
                LoadResult {
                    board: BoardState::empty(),
                    notice: Some(Notice::warning(format!("{}: {}", messages::BOARD_LOAD_FAILED, e))),
                }
            }
        })
    }

    /// Create a card at the end of `column`. The id comes from the store.
    pub async fn add_card(&self, column: ColumnId, title: &str, description: Option<String>) -> Result<Card, Notice> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Notice::error(messages::TASK_CREATE_FAILED));
        }
        let fields = TodoFields::new(title, description, column);
        match self.store.create(&fields).await {
            Ok(item) => {
                debug!("[BOARD] created {} in {}", item.id, column);
                Ok(Card::in_column(&item, column, 0))
            }
            Err(e) => {
                warn!("[BOARD] create failed: {}", e);
                Err(Notice::error(format!("{}: {}", messages::TASK_CREATE_FAILED, e)))
            }
        }
    }

    pub async fn remove_card(&self, id: &str) -> Result<(), Notice> {
        self.store.delete(id).await.map_err(|e| {
            warn!("[BOARD] delete {} failed: {}", id, e);
            Notice::error(format!("{}: {}", messages::TASK_DELETE_FAILED, e))
        })
    }

    pub async fn clear_all(&self) -> Result<(), Notice> {
        self.store.delete_all().await.map_err(|e| {
            warn!("[BOARD] clear failed: {}", e);
            Notice::error(format!("{}: {}", messages::BOARD_CLEAR_FAILED, e))
        })
    }

    /// Send the moved card's new column. The local reorder is not rolled
    /// back on failure; the board may differ from the server until reload.
    pub async fn persist_move(&self, moved: &CardMove) -> Result<(), Notice> {
        let ticket = self.sequencer.issue(format!("card:{}", moved.card.id));
        let result = self.store.update(&moved.card.id, &moved.fields()).await;
        if !self.sequencer.settle(&ticket) {
            debug!("[DND] dropping stale update for {}", moved.card.id);
            return Ok(());
        }
        match result {
            Ok(_) => {
                debug!("[DND] persisted {} -> {}", moved.card.id, moved.to());
                Ok(())
            }
            Err(e) => {
                warn!("[DND] persist {} failed: {}", moved.card.id, e);
                Err(Notice::error(format!("{}: {}", messages::TASK_MOVE_FAILED, e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{ApiError, ApiResult};
    use crate::memory::MemoryTodoStore;
    use crate::notice::NoticeKind;
    use crate::reconciler::{DragReconciler, DropTarget};
    use crate::testing::{item, FailingStore};
    use crate::todo::TodoItem;

    fn seeded() -> Arc<MemoryTodoStore> {
        Arc::new(MemoryTodoStore::with_items(vec![
            item("t1", "Uno", "Pendiente", ""),
            item("t2", "Dos", "Pendiente", ""),
            item("t3", "Tres", "", "Completados"),
        ]))
    }

    #[tokio::test]
    async fn test_load_buckets_items() {
        let service = BoardService::new(seeded());
        let result = service.load().await.expect("load is current");
        assert!(result.notice.is_none());
        assert_eq!(result.board.count_in(ColumnId::Pendiente), 2);
        assert_eq!(result.board.count_in(ColumnId::Completados), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_soft() {
        let service = BoardService::new(Arc::new(FailingStore));
        let result = service.load().await.expect("load is current");
        assert!(result.board.cards().is_empty());
        assert_eq!(result.board.columns().len(), 3);
        assert_eq!(result.notice.map(|n| n.kind), Some(NoticeKind::Warning));
    }

    /// Issues a newer ticket for the same key while its own call is in
    /// flight, then answers the older call
    struct RacingStore {
        sequencer: RequestSequencer,
    }

    #[async_trait(?Send)]
    impl TodoStore for RacingStore {
        async fn list(&self) -> ApiResult<Vec<TodoItem>> {
            self.sequencer.issue(BOARD_KEY);
            Ok(vec![item("late", "Tarde", "", "")])
        }
        async fn create(&self, _: &TodoFields) -> ApiResult<TodoItem> {
            unreachable!()
        }
        async fn update(&self, id: &str, _: &TodoFields) -> ApiResult<TodoItem> {
            self.sequencer.issue(format!("card:{}", id));
            Err(ApiError::new(409, "superseded"))
        }
        async fn delete(&self, _: &str) -> ApiResult<()> {
            unreachable!()
        }
        async fn delete_all(&self) -> ApiResult<()> {
            unreachable!()
        }
    }

    fn racing_service() -> BoardService {
        let sequencer = RequestSequencer::new();
        BoardService {
            store: Arc::new(RacingStore {
                sequencer: sequencer.clone(),
            }),
            sequencer,
        }
    }

    fn move_t1_to(column: ColumnId) -> CardMove {
        let mut board = BoardState::from_items(&[item("t1", "Uno", "", ""), item("t2", "Dos", "", "")]);
        let mut drag = DragReconciler::new();
        drag.drag_start(&mut board, "t1");
        drag.drag_over(&mut board, &DropTarget::Column(column));
        drag.drag_end(&mut board, Some(&DropTarget::Column(column))).unwrap()
    }

    #[tokio::test]
    async fn test_stale_load_is_dropped() {
        let service = racing_service();
        assert!(service.load().await.is_none());
    }

    #[tokio::test]
    async fn test_stale_move_failure_is_ignored() {
        let service = racing_service();
        let moved = move_t1_to(ColumnId::EnProceso);

        assert_eq!(service.persist_move(&moved).await, Ok(()));
        // The newer update for t1 is still in flight
        assert_eq!(service.sequencer.pending(), 1);
    }

    #[tokio::test]
    async fn test_current_move_failure_is_reported() {
        let service = BoardService::new(Arc::new(FailingStore));
        let moved = move_t1_to(ColumnId::Completados);

        let notice = service.persist_move(&moved).await.unwrap_err();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with(messages::TASK_MOVE_FAILED));
        assert_eq!(service.sequencer.pending(), 0);
    }

    #[tokio::test]
    async fn test_add_card_appends_with_remote_id() {
        let store = seeded();
        let service = BoardService::new(store.clone());
        let mut board = service.load().await.unwrap().board;

        let card = service.add_card(ColumnId::Pendiente, "  Cuatro ", None).await.unwrap();
        assert_eq!(card.title, "Cuatro");
        board.insert_card(card);

        let added = board.card("local-1").expect("id assigned by store");
        assert_eq!(added.position, 2);
        assert_eq!(store.list().await.unwrap()[3].completed, "Pendiente");
    }

    #[tokio::test]
    async fn test_failed_add_and_remove_leave_board_alone() {
        let service = BoardService::new(Arc::new(FailingStore));
        let board = BoardState::from_items(&[item("t1", "Uno", "", "")]);

        let err = service.add_card(ColumnId::EnProceso, "Nueva", None).await.unwrap_err();
        assert!(err.is_error());
        let err = service.remove_card("t1").await.unwrap_err();
        assert!(err.message.starts_with(messages::TASK_DELETE_FAILED));
        assert!(board.card("t1").is_some());
        assert_eq!(board.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_move_persists_column_fields() {
        let store = seeded();
        let service = BoardService::new(store.clone());
        let mut board = service.load().await.unwrap().board;
        let mut drag = DragReconciler::new();

        drag.drag_start(&mut board, "t1");
        drag.drag_over(&mut board, &DropTarget::Column(ColumnId::EnProceso));
        let moved = drag
            .drag_end(&mut board, Some(&DropTarget::Column(ColumnId::EnProceso)))
            .unwrap();
        service.persist_move(&moved).await.unwrap();

        let items = store.list().await.unwrap();
        let persisted = items.iter().find(|i| i.id == "t1").unwrap();
        assert_eq!(persisted.completed, "En proceso");
        assert_eq!(persisted.category, "En proceso");
    }

    #[tokio::test]
    async fn test_failed_move_keeps_local_reorder() {
        let service = BoardService::new(Arc::new(FailingStore));
        let mut board = BoardState::from_items(&[item("t1", "Uno", "", ""), item("t2", "Dos", "", "")]);
        let mut drag = DragReconciler::new();

        drag.drag_start(&mut board, "t1");
        drag.drag_over(&mut board, &DropTarget::Column(ColumnId::Completados));
        let moved = drag
            .drag_end(&mut board, Some(&DropTarget::Column(ColumnId::Completados)))
            .unwrap();
        let notice = service.persist_move(&moved).await.unwrap_err();

        assert!(notice.message.starts_with(messages::TASK_MOVE_FAILED));
        assert_eq!(board.card("t1").unwrap().column, ColumnId::Completados);
        assert_eq!(board.card("t2").unwrap().position, 0);
        assert!(board.is_dense());
    }

    #[tokio::test]
    async fn test_clear_all_empties_store() {
        let store = seeded();
        let service = BoardService::new(store.clone());
        service.clear_all().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
