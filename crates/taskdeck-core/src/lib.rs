//! Task list state, persistence, and the derived views a frontend draws.
//!
//! The browser app drives a [`session::Session`]: every user action calls one
//! session method, which mutates the [`store::TaskStore`], writes the whole
//! list back to its [`storage::KeyValueStore`], and the frontend then redraws
//! from a freshly computed [`session::Board`].

pub mod config;
pub mod datetime;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use config::Config;
pub use session::{Board, Session};
pub use storage::{KeyValueStore, MemoryStore};
pub use task::{Category, DraftField, Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use view::{Filter, Progress, SortKey};
