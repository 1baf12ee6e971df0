use std::sync::{
    mpsc,
    Arc,
};

use tokio::runtime::Runtime;
use tracing::debug;

use super::TaskResult;
use crate::{
    catalog::{
        CatalogLoader,
        CatalogSource,
        DetailAggregator,
    },
    core::DexError,
};

/// Runs catalog work off the UI thread and hands results back through a
/// channel the UI drains once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, DexError> {
        let runtime = Runtime::new()
            .map_err(|e| DexError::Runtime(format!("Failed to create task runtime: {e}")))?;

        Ok(Self::with_runtime(Arc::new(runtime)))
    }

    pub fn with_runtime(runtime: Arc<Runtime>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            debug!(task = result.task_type(), "task result");
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn load_next(&self, loader: Arc<CatalogLoader>) {
        let (sender, runtime) = self.task_context();

        runtime.spawn(async move {
            let result = loader.load_next().await.map_err(|e| e.to_string());
            let _ = sender.send(TaskResult::PageLoaded(result));
        });
    }

    pub fn fetch_detail(&self, source: Arc<dyn CatalogSource>, key: String) {
        let (sender, runtime) = self.task_context();

        runtime.spawn(async move {
            let aggregator = DetailAggregator::new(source, key.clone());
            let _ = aggregator
                .fetch_detail(|event| {
                    let _ = sender.send(TaskResult::Detail { key: key.clone(), event });
                })
                .await;
        });
    }
}
