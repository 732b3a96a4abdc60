//! Terminal UI: mode menu and game view. Drives a [`GameSession`] and the
//! computer opponent; all game rules live in [`crate::game`].
//!
//! [`GameSession`]: crate::game::GameSession

mod app;
mod game_view;

pub use app::{App, Mode};
