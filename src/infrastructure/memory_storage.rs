use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    error::{StorageError, StorageResult},
    storage::TaskStorage,
    task::{NewTask, Task, TaskId, TaskPatch},
};

#[derive(Clone, Default)]
pub struct MemoryTaskStorage {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    tasks: BTreeMap<u64, Task>,
    next_id: u64,
}

impl Default for Inner {
    fn default() -> Self {
        Self { tasks: BTreeMap::new(), next_id: 1 }
    }
}

impl MemoryTaskStorage {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)
    }
}

fn sequence(id: &TaskId) -> Option<u64> {
    match id {
        TaskId::Sequence(n) => Some(*n),
        TaskId::Object(_) => None,
    }
}

#[async_trait]
impl TaskStorage for MemoryTaskStorage {
    async fn init(&self) -> StorageResult<()> { Ok(()) }

    async fn get_all_tasks(&self) -> StorageResult<Vec<Task>> {
        // Keys come from a monotonic counter, so key order is creation order.
        Ok(self.lock()?.tasks.values().cloned().collect())
    }

    async fn get_task(&self, id: &TaskId) -> StorageResult<Option<Task>> {
        let Some(key) = sequence(id) else { return Ok(None) };
        Ok(self.lock()?.tasks.get(&key).cloned())
    }

    async fn create_task(&self, input: NewTask) -> StorageResult<Task> {
        let mut inner = self.lock()?;
        let key = inner.next_id;
        inner.next_id += 1;
        let task = input.into_task(TaskId::Sequence(key));
        inner.tasks.insert(key, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> StorageResult<Option<Task>> {
        let Some(key) = sequence(id) else { return Ok(None) };
        let mut inner = self.lock()?;
        let Some(task) = inner.tasks.get_mut(&key) else { return Ok(None) };
        task.apply(patch);
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: &TaskId) -> StorageResult<bool> {
        let Some(key) = sequence(id) else { return Ok(false) };
        Ok(self.lock()?.tasks.remove(&key).is_some())
    }
}
