use crate::model::{Filter, Task};

#[derive(Debug)]
pub enum Action {
    FetchPage { seq: u64, page: u32, filter: Filter },
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    PageLoaded {
        seq: u64,
        page: u32,
        tasks: Vec<Task>,
    },
    FetchFailed {
        seq: u64,
        message: String,
    },
    Error(String),
    Status(String),
}
