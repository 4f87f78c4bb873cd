pub mod api;
pub mod storage;

pub use api::{KeyValueService, Server};
pub use storage::{InMemoryStore, Store};
