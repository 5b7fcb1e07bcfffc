use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};

use crate::app::draft::{Draft, DraftField};
use crate::app::error::{Result, StoreError};
use crate::app::models::{Category, Priority, TodoId, TodoItem, TodoList};
use crate::app::storage::{load_todos, save_todos, KeyValueStore};

// Hands out timestamp-based ids that never repeat, even within one millisecond
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<TodoId>,
}

impl IdGenerator {
    // Start above every id already in use
    pub fn seeded(last: Option<TodoId>) -> IdGenerator {
        IdGenerator { last }
    }

    pub fn next_at(&mut self, now_ms: TodoId) -> Result<TodoId> {
        let id = match self.last {
            Some(last) if last >= now_ms => last
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted(last))?,
            _ => now_ms,
        };
        self.last = Some(id);
        Ok(id)
    }

    pub fn next(&mut self) -> Result<TodoId> {
        self.next_at(Utc::now().timestamp_millis())
    }
}

// Owns the todo list and the input draft. Every list change is written through to storage.
pub struct TodoStore<S: KeyValueStore> {
    list: TodoList,
    draft: Draft,
    storage: S,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TodoStore<S> {
    // Load the list from storage. Data that does not parse starts an empty list;
    // a failed read is returned so the stored list is never overwritten.
    pub fn load(storage: S) -> Result<TodoStore<S>> {
        let list = match load_todos(&storage) {
            Ok(list) => {
                info!("Loaded {} todos", list.len());
                list
            }
            Err(StoreError::MalformedState(reason)) => {
                warn!("Discarding stored todos: {reason}");
                TodoList::new()
            }
            Err(e) => return Err(e),
        };

        Ok(TodoStore {
            ids: IdGenerator::seeded(list.max_id()),
            list,
            draft: Draft::default(),
            storage,
        })
    }

    pub fn todos(&self) -> &TodoList {
        &self.list
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.list.get(id)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    // Append a new task. Blank text leaves everything untouched.
    pub fn create(
        &mut self,
        text: &str,
        category: Category,
        priority: Priority,
        due_date: NaiveDate,
    ) -> Result<&TodoList> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(&self.list);
        }

        let item = TodoItem {
            id: self.ids.next()?,
            text: text.to_string(),
            completed: false,
            priority,
            category,
            due_date,
        };
        debug!("Creating todo {}", item.id);

        self.commit(self.list.with_appended(item))?;
        self.draft.text.clear();
        Ok(&self.list)
    }

    // Create a task from the current draft
    pub fn submit_draft(&mut self) -> Result<&TodoList> {
        let Draft {
            text,
            category,
            priority,
            due_date,
        } = self.draft.clone();
        self.create(&text, category, priority, due_date)
    }

    pub fn toggle_complete(&mut self, id: TodoId) -> Result<&TodoList> {
        debug!("Toggling todo {id}");
        self.commit(self.list.with_toggled(id))?;
        Ok(&self.list)
    }

    pub fn delete(&mut self, id: TodoId) -> Result<&TodoList> {
        debug!("Deleting todo {id}");
        self.commit(self.list.without(id))?;
        Ok(&self.list)
    }

    pub fn set_draft_field(&mut self, field: DraftField) {
        self.draft.set(field);
    }

    // Persist first so a failed write never leaves memory ahead of storage
    fn commit(&mut self, list: TodoList) -> Result<()> {
        save_todos(&mut self.storage, &list)?;
        self.list = list;
        Ok(())
    }
}
