use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::error;
use ratatui::{prelude::*, widgets::*};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::app::draft::DraftField;
use crate::app::error::Result;
use crate::app::input_form::*;
use crate::app::models::TodoItem;
use crate::app::storage::KeyValueStore;
use crate::app::todo_store::TodoStore;

pub struct App<S: KeyValueStore> {
    pub store: TodoStore<S>,
    pub form: InputForm,
    pub list_state: ListState,
    pub status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: TodoStore<S>) -> App<S> {
        App {
            store,
            form: InputForm::default(),
            list_state: ListState::default(),
            status: None,
        }
    }

    // Apply one key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return false;
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus = self.form.focus.next();
                return true;
            }
            KeyCode::BackTab => {
                self.form.focus = self.form.focus.previous();
                return true;
            }
            _ => {}
        }

        let draft = self.store.draft();
        let update = match self.form.focus {
            Focus::Text => match key.code {
                KeyCode::Enter => {
                    let result = self.store.submit_draft().map(|_| ());
                    self.report(result);
                    self.form.clamp_cursor(self.store.draft());
                    None
                }
                KeyCode::Left => {
                    self.form.move_cursor_left();
                    None
                }
                KeyCode::Right => {
                    self.form.move_cursor_right(draft);
                    None
                }
                KeyCode::Backspace => self.form.delete_char(draft),
                KeyCode::Char(to_insert) => Some(self.form.insert_char(draft, to_insert)),
                _ => None,
            },
            Focus::Category => match key.code {
                KeyCode::Right | KeyCode::Down => Some(next_category(draft, true)),
                KeyCode::Left | KeyCode::Up => Some(next_category(draft, false)),
                _ => None,
            },
            Focus::Priority => match key.code {
                KeyCode::Right | KeyCode::Down => Some(next_priority(draft, true)),
                KeyCode::Left | KeyCode::Up => Some(next_priority(draft, false)),
                _ => None,
            },
            Focus::DueDate => match key.code {
                KeyCode::Right => Some(shift_due_date(draft, 1)),
                KeyCode::Left => Some(shift_due_date(draft, -1)),
                KeyCode::Up => Some(shift_due_date(draft, 7)),
                KeyCode::Down => Some(shift_due_date(draft, -7)),
                KeyCode::Char('t') => Some(DraftField::DueDate(today())),
                _ => None,
            },
            Focus::List => {
                match key.code {
                    KeyCode::Char('q') => return false,
                    KeyCode::Down => self.next(),
                    KeyCode::Up => self.previous(),
                    KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
                    KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
                    _ => {}
                }
                None
            }
        };

        if let Some(field) = update {
            self.store.set_draft_field(field);
        }
        true
    }

    // Move the selection to the next item
    pub fn next(&mut self) {
        let len = self.store.len();
        let i = match self.list_state.selected() {
            Some(i) if len > 0 && i < len - 1 => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    // Move the selection to the previous item
    pub fn previous(&mut self) {
        let len = self.store.len();
        let i = match self.list_state.selected() {
            Some(0) if len > 0 => len - 1,
            Some(i) if len > 0 => i - 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&TodoItem> {
        self.list_state
            .selected()
            .and_then(|i| self.store.todos().items().get(i))
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected().map(|item| item.id) {
            let result = self.store.toggle_complete(id).map(|_| ());
            self.report(result);
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected().map(|item| item.id) {
            let result = self.store.delete(id).map(|_| ());
            self.report(result);
        }
        // Keep the highlight on a row that still exists
        let len = self.store.len();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(e) => {
                error!("Failed to save todos: {e}");
                self.status = Some(format!("Could not save: {e}"));
            }
        }
    }
}

pub fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw_ui(f, &mut app))?;
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if !app.handle_key(key) {
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

// Draws the whole user interface
pub fn draw_ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    // Input panel on top, the list below, one line of help at the bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.size());

    let input = Paragraph::new(get_input_form_ui(&app.form, app.store.draft()))
        .block(Block::new().title("To-Do List").borders(Borders::ALL))
        .style(Style::new().white());
    f.render_widget(input, chunks[0]);

    let list_block = Block::default().borders(Borders::ALL).title("Tasks");
    if app.store.is_empty() {
        let empty = Paragraph::new("No tasks yet. Add one above!")
            .alignment(Alignment::Center)
            .style(Style::new().fg(Color::DarkGray))
            .block(list_block);
        f.render_widget(empty, chunks[1]);
    } else {
        let highlight = if app.form.focus == Focus::List {
            Style::default()
                .bg(Color::LightGreen)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let task_list = List::new(get_list_items_ui(app.store.todos().items()))
            .block(list_block)
            .highlight_style(highlight)
            .highlight_symbol(">> ");
        f.render_stateful_widget(task_list, chunks[1], &mut app.list_state);
    }

    let help = match app.status {
        Some(ref status) => Paragraph::new(status.as_str()).style(Style::new().fg(Color::Red)),
        None => Paragraph::new(get_help_ui(app.form.focus)).style(Style::new().fg(Color::Gray)),
    };
    f.render_widget(help, chunks[2]);
}

// Build the UI (list) for the tasks
pub fn get_list_items_ui(todos: &[TodoItem]) -> Vec<ListItem<'_>> {
    todos
        .iter()
        .map(|todo| {
            let text_style = if todo.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };

            let lines = vec![
                Line::from(vec![
                    Span::from(if todo.completed { "[x] " } else { "[ ] " }),
                    Span::styled(todo.text.as_str(), text_style),
                ]),
                Line::from(vec![
                    Span::from("    "),
                    Span::styled(
                        format!("[{}]", todo.category.label()),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::from(" "),
                    Span::styled(
                        format!("[{}]", todo.priority.label()),
                        Style::default().fg(priority_color(todo.priority)),
                    ),
                    Span::from(" "),
                    Span::from(format!("[{}]", todo.due_date.format("%d.%m.%Y"))),
                ]),
            ];
            ListItem::new(lines)
        })
        .collect()
}

// One line of key hints for the focused part of the screen
pub fn get_help_ui(focus: Focus) -> &'static str {
    match focus {
        Focus::Text => "Enter - add task | Tab - next field | Esc - quit",
        Focus::Category | Focus::Priority => "Left/Right - change | Tab - next field | Esc - quit",
        Focus::DueDate => "Left/Right - day | Up/Down - week | t - today | Tab - next field",
        Focus::List => "Up/Down - select | Enter - toggle do/done | x - delete | q - quit",
    }
}
