// Key-value persistence for the todo list
// The list lives under a single key as a JSON array, written in full on every change
use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

use crate::app::error::{Result, StoreError};
use crate::app::models::TodoList;

pub const TODOS_KEY: &str = "todos";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// SQLite-backed store, one row per key
pub struct SqliteStorage {
    db_con: Connection,
}

impl SqliteStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SqliteStorage> {
        let storage = SqliteStorage {
            db_con: Connection::open(path.as_ref())?,
        };
        storage.create_table_if_not_exists()?;
        info!("Opened key-value store at {}", path.as_ref().display());
        Ok(storage)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<SqliteStorage> {
        let storage = SqliteStorage {
            db_con: Connection::open_in_memory()?,
        };
        storage.create_table_if_not_exists()?;
        Ok(storage)
    }

    fn create_table_if_not_exists(&self) -> Result<()> {
        self.db_con.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
            (),
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .db_con
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.db_con.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            (key, value),
        )?;
        Ok(())
    }
}

// In-memory store, used as a fake in tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    pub fn with_entry(key: &str, value: &str) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// Read the todo list. A missing key is an empty list; anything unparsable is MalformedState.
pub fn load_todos(storage: &impl KeyValueStore) -> Result<TodoList> {
    let raw = match storage.get(TODOS_KEY)? {
        Some(raw) => raw,
        None => {
            debug!("No stored todos, starting empty");
            return Ok(TodoList::new());
        }
    };

    let list: TodoList =
        serde_json::from_str(&raw).map_err(|e| StoreError::MalformedState(e.to_string()))?;
    if let Some(id) = list.duplicate_id() {
        return Err(StoreError::MalformedState(format!("duplicate todo id {id}")));
    }
    Ok(list)
}

// Write the whole todo list
pub fn save_todos(storage: &mut impl KeyValueStore, list: &TodoList) -> Result<()> {
    let raw = serde_json::to_string(list)?;
    storage.set(TODOS_KEY, &raw)?;
    debug!("Saved {} todos", list.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Category, Priority, TodoItem};
    use chrono::NaiveDate;

    fn sample_list() -> TodoList {
        TodoList::from(vec![
            TodoItem {
                id: 1,
                text: "Buy milk".to_string(),
                completed: false,
                priority: Priority::High,
                category: Category::Shopping,
                due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            },
            TodoItem {
                id: 2,
                text: "Write report".to_string(),
                completed: true,
                priority: Priority::Low,
                category: Category::Work,
                due_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            },
        ])
    }

    #[test]
    fn missing_key_loads_empty_list() {
        let storage = MemoryStorage::new();
        assert!(load_todos(&storage).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order() {
        let mut storage = MemoryStorage::new();
        save_todos(&mut storage, &sample_list()).unwrap();
        assert_eq!(load_todos(&storage).unwrap(), sample_list());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let storage = MemoryStorage::with_entry(TODOS_KEY, "[{not json");
        assert!(matches!(
            load_todos(&storage),
            Err(StoreError::MalformedState(_))
        ));
    }

    #[test]
    fn bad_date_is_malformed() {
        let storage = MemoryStorage::with_entry(
            TODOS_KEY,
            r#"[{"id":1,"text":"a","completed":false,"priority":"low","category":"work","dueDate":"05/01/2024"}]"#,
        );
        assert!(matches!(
            load_todos(&storage),
            Err(StoreError::MalformedState(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let storage = MemoryStorage::with_entry(
            TODOS_KEY,
            r#"[
                {"id":7,"text":"a","completed":false,"priority":"low","category":"work","dueDate":"2024-05-01"},
                {"id":7,"text":"b","completed":true,"priority":"high","category":"other","dueDate":"2024-05-02"}
            ]"#,
        );
        assert!(matches!(
            load_todos(&storage),
            Err(StoreError::MalformedState(msg)) if msg.contains("duplicate todo id 7")
        ));
    }

    #[test]
    fn reads_browser_written_json() {
        let storage = MemoryStorage::with_entry(
            TODOS_KEY,
            r#"[{"id":1714521600123,"text":"Buy milk","completed":false,"priority":"high","category":"shopping","dueDate":"2024-05-01"}]"#,
        );
        let list = load_todos(&storage).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].id, 1714521600123);
        assert_eq!(list.items()[0].category, Category::Shopping);
    }

    #[test]
    fn sqlite_set_overwrites_value() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.get(TODOS_KEY).unwrap(), None);

        storage.set(TODOS_KEY, "[]").unwrap();
        storage.set(TODOS_KEY, "[1]").unwrap();
        assert_eq!(storage.get(TODOS_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn sqlite_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        {
            let mut storage = SqliteStorage::open(&path).unwrap();
            save_todos(&mut storage, &sample_list()).unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(load_todos(&storage).unwrap(), sample_list());
    }
}
