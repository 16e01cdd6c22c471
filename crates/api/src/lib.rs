pub mod auth_handlers;
pub mod file_handlers;
pub mod item_handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod state;

pub use state::{AppState, ItemStore};
