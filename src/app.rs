pub mod config;
pub mod draft;
pub mod error;
pub mod input_form;
pub mod logging;
pub mod models;
pub mod storage;
pub mod todo_store;
pub mod ui;
