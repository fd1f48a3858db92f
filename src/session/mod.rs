/// Session management module - Gateway

mod context;
mod store;
mod transcript;

pub use context::SessionContext;
pub use store::{resolve_position, resolve_student_id, StudentStore};
pub use transcript::{Role, Transcript, Turn};
