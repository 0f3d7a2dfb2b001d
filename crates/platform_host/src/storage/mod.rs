//! Persistence contracts for the desktop key-value namespace.

pub mod prefs;
