use async_trait::async_trait;
use super::error::StorageResult;
use super::task::{NewTask, Task, TaskId, TaskPatch};

/// Persistence port for tasks. Adapters differ only in how ids look and in
/// how their backend can fail.
#[async_trait]
pub trait TaskStorage: Send + Sync + 'static {
    async fn init(&self) -> StorageResult<()>;
    async fn get_all_tasks(&self) -> StorageResult<Vec<Task>>;
    async fn get_task(&self, id: &TaskId) -> StorageResult<Option<Task>>;
    async fn create_task(&self, input: NewTask) -> StorageResult<Task>;
    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> StorageResult<Option<Task>>;
    async fn delete_task(&self, id: &TaskId) -> StorageResult<bool>;
}
