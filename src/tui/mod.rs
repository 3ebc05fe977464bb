//! Terminal front end: ratatui rendering over crossterm.

pub mod app;
pub mod controller;
pub mod ui;
