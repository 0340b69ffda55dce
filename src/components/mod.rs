//! UI Components
//!
//! Reusable Leptos components.

mod auth_page;
mod confirm_button;
mod kanban_board;
mod kanban_column;
mod profile_settings;
mod task_card;
mod toaster;

pub use auth_page::AuthPage;
pub use confirm_button::ConfirmButton;
pub use kanban_board::KanbanBoard;
pub use kanban_column::KanbanColumn;
pub use profile_settings::ProfileSettings;
pub use task_card::TaskCard;
pub use toaster::Toaster;
