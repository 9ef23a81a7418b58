//! Core module - Configuration, events, and panel state

pub mod config;
pub mod events;
pub mod state;
