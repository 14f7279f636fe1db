#[cfg(test)]
mod tests {
    use super::super::task_service::{TaskService, TaskServiceImpl};
    use crate::domain::{
        error::{StorageError, StorageResult},
        storage::TaskStorage,
        task::{NewTask, Task, TaskId, TaskPatch},
    };
    use async_trait::async_trait;

    /// Storage whose backend is always down.
    #[derive(Clone, Default)]
    struct BrokenStorage;

    #[async_trait]
    impl TaskStorage for BrokenStorage {
        async fn init(&self) -> StorageResult<()> { Ok(()) }
        async fn get_all_tasks(&self) -> StorageResult<Vec<Task>> { Err(StorageError::Poisoned) }
        async fn get_task(&self, _id: &TaskId) -> StorageResult<Option<Task>> { Err(StorageError::Poisoned) }
        async fn create_task(&self, _input: NewTask) -> StorageResult<Task> { Err(StorageError::Poisoned) }
        async fn update_task(&self, _id: &TaskId, _patch: TaskPatch) -> StorageResult<Option<Task>> { Err(StorageError::Poisoned) }
        async fn delete_task(&self, _id: &TaskId) -> StorageResult<bool> { Err(StorageError::Poisoned) }
    }

    #[tokio::test]
    async fn unit_create_and_get() {
        let storage = crate::infrastructure::memory_storage::MemoryTaskStorage::new();
        let service = TaskServiceImpl::new(storage);
        let created = service.create(NewTask::new("X")).await.unwrap();
        assert_eq!(created.title, "X");
        let got = service.get(&created.id).await.unwrap().unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn unit_backend_errors_propagate() {
        let service = TaskServiceImpl::new(BrokenStorage);
        assert!(service.list().await.is_err());
        assert!(service.create(NewTask::new("X")).await.is_err());
        assert!(service.delete(&TaskId::Sequence(1)).await.is_err());
    }
}
