use chrono::{Local, NaiveDate};
use derivative::Derivative;

use crate::app::models::{Category, Priority};

// Input values applied to the next created task. Never persisted.
#[derive(Derivative, Debug, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub struct Draft {
    pub text: String,
    pub category: Category,
    pub priority: Priority,
    #[derivative(Default(value = "Local::now().date_naive()"))]
    pub due_date: NaiveDate,
}

// A single draft update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Text(String),
    Category(Category),
    Priority(Priority),
    DueDate(NaiveDate),
}

impl Draft {
    pub fn set(&mut self, field: DraftField) {
        match field {
            DraftField::Text(text) => self.text = text,
            DraftField::Category(category) => self.category = category,
            DraftField::Priority(priority) => self.priority = priority,
            DraftField::DueDate(due_date) => self.due_date = due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_personal_medium_today() {
        let draft = Draft::default();
        assert_eq!(draft.text, "");
        assert_eq!(draft.category, Category::Personal);
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.due_date, Local::now().date_naive());
    }

    #[test]
    fn set_updates_one_field() {
        let mut draft = Draft::default();
        let before = draft.clone();

        draft.set(DraftField::Priority(Priority::High));
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.category, before.category);
        assert_eq!(draft.due_date, before.due_date);

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        draft.set(DraftField::DueDate(date));
        draft.set(DraftField::Text("Buy milk".to_string()));
        assert_eq!(draft.due_date, date);
        assert_eq!(draft.text, "Buy milk");
    }
}
