//! Pokegrid - a PokeAPI catalog browser TUI
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod favorites;
pub mod reducer;
pub mod state;
