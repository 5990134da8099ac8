//! egui presentation for the PRD chat client.
//!
//! Panels only render and report what the user asked for; the app layer
//! turns those actions into controller calls.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;

pub use state::UiState;
