use crate::catalog::{
    DetailEvent,
    LoadOutcome,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    PageLoaded(Result<LoadOutcome, String>),
    Detail { key: String, event: DetailEvent },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::PageLoaded(_) => "page_loaded",
            TaskResult::Detail { event, .. } => match event {
                DetailEvent::Base(_) => "detail_base",
                DetailEvent::Complete(_) => "detail_complete",
                DetailEvent::NotFound(_) => "detail_not_found",
            },
        }
    }
}
