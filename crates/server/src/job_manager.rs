use crate::types::{TaskInfo, TaskStatus};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Tracks background tasks; finished tasks keep their final state
#[derive(Default)]
pub struct JobManager {
    tasks: Arc<RwLock<HashMap<String, TaskInfo>>>,
    handles: Arc<RwLock<HashMap<String, AbortHandle>>>,
}

impl JobManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_task(&self, task_type: impl Into<String>, target: impl Into<String>) -> String {
        let task_id = Uuid::new_v4().to_string();
        let task_info = TaskInfo {
            task_id: task_id.clone(),
            task_type: task_type.into(),
            target: target.into(),
            status: TaskStatus::Running,
            progress: 0,
            message: "Starting...".to_string(),
            result: None,
            started_at: Utc::now(),
            finished_at: None,
        };

        self.tasks.write().await.insert(task_id.clone(), task_info);
        task_id
    }

    /// Remember how to abort a running task; a task cancelled before
    /// its handle arrives is aborted here
    pub async fn attach(&self, task_id: &str, handle: AbortHandle) {
        let status = self.tasks.read().await.get(task_id).map(|t| t.status.clone());
        match status {
            Some(TaskStatus::Running) => {
                self.handles.write().await.insert(task_id.to_string(), handle);
            }
            Some(TaskStatus::Cancelled) => handle.abort(),
            _ => {}
        }
    }

    pub async fn update_progress(&self, task_id: &str, progress: u8, message: impl Into<String>) {
        if let Some(task) = self.tasks.write().await.get_mut(task_id) {
            if task.status == TaskStatus::Running {
                task.progress = progress.min(100);
                task.message = message.into();
            }
        }
    }

    pub async fn complete_task(&self, task_id: &str, result: Option<serde_json::Value>) {
        self.finish(task_id, |task| {
            task.status = TaskStatus::Completed;
            task.progress = 100;
            task.message = "Completed".to_string();
            task.result = result;
        })
        .await;
    }

    pub async fn fail_task(&self, task_id: &str, error: impl Into<String>) {
        let error = error.into();
        self.finish(task_id, |task| {
            task.status = TaskStatus::Failed;
            task.message = error;
        })
        .await;
    }

    /// Abort a running task; false if unknown or already finished
    pub async fn cancel_task(&self, task_id: &str) -> bool {
        let mut cancelled = false;
        self.finish(task_id, |task| {
            task.status = TaskStatus::Cancelled;
            task.message = "Cancelled by user".to_string();
            cancelled = true;
        })
        .await;
        cancelled
    }

    pub async fn get_tasks(&self) -> Vec<TaskInfo> {
        let mut tasks: Vec<TaskInfo> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        tasks
    }

    pub async fn get_task(&self, task_id: &str) -> Option<TaskInfo> {
        self.tasks.read().await.get(task_id).cloned()
    }

    /// Apply `update` to a running task, then drop its abort handle
    async fn finish(&self, task_id: &str, update: impl FnOnce(&mut TaskInfo)) {
        let final_status = {
            let mut tasks = self.tasks.write().await;
            match tasks.get_mut(task_id) {
                Some(task) if task.status == TaskStatus::Running => {
                    update(task);
                    task.finished_at = Some(Utc::now());
                    Some(task.status.clone())
                }
                _ => None,
            }
        };

        let Some(status) = final_status else {
            return;
        };

        let handle = self.handles.write().await.remove(task_id);
        if let (Some(handle), TaskStatus::Cancelled) = (handle, status) {
            handle.abort();
        }
    }
}
