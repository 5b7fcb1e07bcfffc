use chrono::{Days, Local, NaiveDate};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::app::draft::{Draft, DraftField};
use crate::app::models::{Category, Priority};

// Which part of the screen receives key input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Text,
    Category,
    Priority,
    DueDate,
    List,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Text,
        Focus::Category,
        Focus::Priority,
        Focus::DueDate,
        Focus::List,
    ];

    pub fn next(self) -> Focus {
        cycle(&Focus::ORDER, self, true)
    }

    pub fn previous(self) -> Focus {
        cycle(&Focus::ORDER, self, false)
    }
}

// Step to the neighbour of `current` in `all`, wrapping around
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let i = all.iter().position(|v| *v == current).unwrap_or(0);
    let j = if forward {
        (i + 1) % all.len()
    } else if i == 0 {
        all.len() - 1
    } else {
        i - 1
    };
    all[j]
}

// State of the input panel: focus and the text cursor (in chars)
#[derive(Debug, Default)]
pub struct InputForm {
    pub focus: Focus,
    cursor: usize,
}

impl InputForm {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    // The cursor can lag behind when the draft text is cleared after a submit
    pub fn clamp_cursor(&mut self, draft: &Draft) {
        self.cursor = self.cursor.min(draft.text.chars().count());
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self, draft: &Draft) {
        self.cursor = (self.cursor + 1).min(draft.text.chars().count());
    }

    // Insert a char at the cursor and return the updated text field
    pub fn insert_char(&mut self, draft: &Draft, to_insert: char) -> DraftField {
        let mut text = draft.text.clone();
        let at = byte_offset(&text, self.cursor);
        text.insert(at, to_insert);
        self.cursor += 1;
        DraftField::Text(text)
    }

    // Delete the char before the cursor
    pub fn delete_char(&mut self, draft: &Draft) -> Option<DraftField> {
        if self.cursor == 0 {
            return None;
        }
        let mut text = draft.text.clone();
        text.remove(byte_offset(&text, self.cursor - 1));
        self.cursor -= 1;
        Some(DraftField::Text(text))
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

pub fn next_category(draft: &Draft, forward: bool) -> DraftField {
    DraftField::Category(cycle(&Category::ALL, draft.category, forward))
}

pub fn next_priority(draft: &Draft, forward: bool) -> DraftField {
    DraftField::Priority(cycle(&Priority::ALL, draft.priority, forward))
}

// Move the due date by a number of days; out-of-range dates are left alone
pub fn shift_due_date(draft: &Draft, days: i64) -> DraftField {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        draft.due_date.checked_add_days(step)
    } else {
        draft.due_date.checked_sub_days(step)
    };
    DraftField::DueDate(shifted.unwrap_or(draft.due_date))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

// Returns the UI content for the input panel
pub fn get_input_form_ui<'a>(form: &InputForm, draft: &'a Draft) -> Vec<Line<'a>> {
    const GRAY_TEXT: Style = Style::new().fg(Color::Rgb(110, 110, 110));
    const WHITE_TEXT: Style = Style::new().fg(Color::White);
    const BLACK_ON_WHITE: Style = Style::new().fg(Color::Black).bg(Color::White);
    let active_prefix = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);

    let prefix = |label: &'static str, focus: Focus| {
        if form.focus == focus {
            Span::styled(label, active_prefix)
        } else {
            Span::styled(label, WHITE_TEXT)
        }
    };

    let mut text_spans = vec![prefix("Task:      ", Focus::Text)];
    if form.focus == Focus::Text {
        // Highlight the char under the cursor, or a trailing block at the end
        let before: String = draft.text.chars().take(form.cursor).collect();
        let under: String = draft.text.chars().skip(form.cursor).take(1).collect();
        let after: String = draft.text.chars().skip(form.cursor + 1).collect();
        text_spans.push(Span::styled(before, WHITE_TEXT));
        if under.is_empty() {
            text_spans.push(Span::styled(" ", BLACK_ON_WHITE));
        } else {
            text_spans.push(Span::styled(under, BLACK_ON_WHITE));
        }
        text_spans.push(Span::styled(after, WHITE_TEXT));
    } else if draft.text.is_empty() {
        text_spans.push(Span::styled("Add a new task...", GRAY_TEXT));
    } else {
        text_spans.push(Span::styled(draft.text.as_str(), WHITE_TEXT));
    }

    let selector = |value: String, focus: Focus, style: Style| {
        if form.focus == focus {
            Span::styled(format!("< {value} >"), style.add_modifier(Modifier::BOLD))
        } else {
            Span::styled(format!("  {value}  "), style)
        }
    };

    vec![
        Line::from(text_spans),
        Line::from(vec![
            prefix("Category:  ", Focus::Category),
            selector(draft.category.label().to_string(), Focus::Category, WHITE_TEXT),
        ]),
        Line::from(vec![
            prefix("Priority:  ", Focus::Priority),
            selector(
                draft.priority.label().to_string(),
                Focus::Priority,
                Style::new().fg(priority_color(draft.priority)),
            ),
        ]),
        Line::from(vec![
            prefix("Due date:  ", Focus::DueDate),
            selector(
                draft.due_date.format("%Y-%m-%d").to_string(),
                Focus::DueDate,
                WHITE_TEXT,
            ),
        ]),
    ]
}
