//! CLI commands for numhist

pub mod bot;
pub mod chat;
pub mod config;
pub mod dispatch;
pub mod output;
pub mod send;
