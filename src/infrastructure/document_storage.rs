use std::str::FromStr;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};

use crate::domain::{
    error::StorageResult,
    storage::TaskStorage,
    task::{NewTask, Task, TaskId, TaskPatch},
};

const OBJECT_ID_LEN: usize = 24;

#[derive(Clone)]
pub struct DocumentTaskStorage {
    pool: SqlitePool,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

impl From<NewTask> for TaskDocument {
    fn from(input: NewTask) -> Self {
        Self {
            title: input.title,
            description: Some(input.description.unwrap_or_default()),
            completed: input.completed.unwrap_or(false),
        }
    }
}

impl DocumentTaskStorage {
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to an in-memory database gets its own empty database,
        // so keep exactly one connection open for the lifetime of the pool.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl TaskStorage for DocumentTaskStorage {
    async fn init(&self) -> StorageResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS task_documents (
                id TEXT PRIMARY KEY NOT NULL DEFAULT (lower(hex(randomblob(12)))),
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_all_tasks(&self) -> StorageResult<Vec<Task>> {
        let rows = sqlx::query("SELECT id, document FROM task_documents ORDER BY created_at, rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_task).collect()
    }

    async fn get_task(&self, id: &TaskId) -> StorageResult<Option<Task>> {
        let Some(key) = object_key(id) else { return Ok(None) };
        let row = sqlx::query("SELECT id, document FROM task_documents WHERE id = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn create_task(&self, input: NewTask) -> StorageResult<Task> {
        let document = serde_json::to_string(&TaskDocument::from(input))?;
        let now = timestamp();
        let row = sqlx::query(
            "INSERT INTO task_documents (document, created_at, updated_at)
             VALUES (?1, ?2, ?3)
             RETURNING id, document",
        )
        .bind(document)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;
        row_to_task(&row)
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> StorageResult<Option<Task>> {
        let Some(key) = object_key(id) else { return Ok(None) };
        if patch.is_empty() {
            return self.get_task(id).await;
        }
        let row = sqlx::query(
            "UPDATE task_documents
             SET document = json_patch(document, ?2), updated_at = ?3
             WHERE id = ?1
             RETURNING id, document",
        )
        .bind(key)
        .bind(serde_json::to_string(&patch)?)
        .bind(timestamp())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn delete_task(&self, id: &TaskId) -> StorageResult<bool> {
        let Some(key) = object_key(id) else { return Ok(false) };
        let result = sqlx::query("DELETE FROM task_documents WHERE id = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Normalised database key for `id`, or `None` when it cannot name a
/// document. Callers report that as "not found".
fn object_key(id: &TaskId) -> Option<String> {
    match id {
        TaskId::Object(s) if s.len() == OBJECT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) => {
            Some(s.to_ascii_lowercase())
        }
        other => {
            tracing::warn!(id = %other, "malformed document id");
            None
        }
    }
}

fn row_to_task(row: &SqliteRow) -> StorageResult<Task> {
    let id: String = row.try_get("id")?;
    let raw: String = row.try_get("document")?;
    let doc: TaskDocument = serde_json::from_str(&raw)?;
    Ok(Task {
        id: TaskId::Object(id),
        title: doc.title,
        description: doc.description.unwrap_or_default(),
        completed: doc.completed,
    })
}
