use crate::domain::error::StorageResult;
use crate::domain::storage::TaskStorage;
use crate::domain::task::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;

#[async_trait]
pub trait TaskService: Send + Sync + 'static {
    async fn list(&self) -> StorageResult<Vec<Task>>;
    async fn get(&self, id: &TaskId) -> StorageResult<Option<Task>>;
    async fn create(&self, input: NewTask) -> StorageResult<Task>;
    async fn update(&self, id: &TaskId, patch: TaskPatch) -> StorageResult<Option<Task>>;
    async fn delete(&self, id: &TaskId) -> StorageResult<bool>;
}

#[derive(Clone)]
pub struct TaskServiceImpl<S: TaskStorage> {
    storage: S,
}

impl<S: TaskStorage> TaskServiceImpl<S> {
    pub fn new(storage: S) -> Self { Self { storage } }
}

#[async_trait]
impl<S: TaskStorage> TaskService for TaskServiceImpl<S> {
    #[tracing::instrument(skip_all)]
    async fn list(&self) -> StorageResult<Vec<Task>> {
        let tasks = self.storage.get_all_tasks().await?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    #[tracing::instrument(skip_all, fields(id = %id))]
    async fn get(&self, id: &TaskId) -> StorageResult<Option<Task>> {
        self.storage.get_task(id).await
    }

    #[tracing::instrument(skip_all)]
    async fn create(&self, input: NewTask) -> StorageResult<Task> {
        let task = self.storage.create_task(input).await?;
        tracing::info!(id = %task.id, "task created");
        Ok(task)
    }

    #[tracing::instrument(skip_all, fields(id = %id))]
    async fn update(&self, id: &TaskId, patch: TaskPatch) -> StorageResult<Option<Task>> {
        let updated = self.storage.update_task(id, patch).await?;
        if updated.is_some() { tracing::info!("task updated"); }
        Ok(updated)
    }

    #[tracing::instrument(skip_all, fields(id = %id))]
    async fn delete(&self, id: &TaskId) -> StorageResult<bool> {
        let deleted = self.storage.delete_task(id).await?;
        if deleted { tracing::info!("task deleted"); }
        Ok(deleted)
    }
}
