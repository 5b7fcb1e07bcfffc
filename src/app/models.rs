use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TodoId = i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Shopping,
    Other,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Personal,
        Category::Work,
        Category::Shopping,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }
}

// One task. Field names follow the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    pub due_date: NaiveDate,
}

// Insertion-ordered list of tasks, unique by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> TodoList {
        TodoList::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn max_id(&self) -> Option<TodoId> {
        self.items.iter().map(|item| item.id).max()
    }

    // Returns the id that appears more than once, if any
    pub fn duplicate_id(&self) -> Option<TodoId> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .map(|item| item.id)
            .find(|id| !seen.insert(*id))
    }

    // The mutators below return a new list and leave `self` untouched.

    pub fn with_appended(&self, item: TodoItem) -> TodoList {
        let mut items = self.items.clone();
        items.push(item);
        TodoList { items }
    }

    pub fn with_toggled(&self, id: TodoId) -> TodoList {
        TodoList {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id == id {
                        TodoItem {
                            completed: !item.completed,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    pub fn without(&self, id: TodoId) -> TodoList {
        TodoList {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> TodoList {
        TodoList { items }
    }
}
