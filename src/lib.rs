//! # Connect Four
//!
//! A Connect Four game engine with a bounded-lookahead computer opponent and a
//! terminal front-end built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, sides, run detection, session state machine
//! - [`ai`] — Layered heuristic opponent
//! - [`ui`] — Terminal UI: mode menu, game view, delayed computer moves
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
