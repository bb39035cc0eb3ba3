//! Numhist Core Library
//!
//! Core domain logic for the Number History bot: phone normalization,
//! moderated history entries, and the SQLite store behind them.

pub mod bot;
pub mod config;
pub mod db;
pub mod entry;
pub mod error;
pub mod format;
pub mod logging;
pub mod moderation;
pub mod phone;
pub mod record;
