//! CLI Interface: User input, terminal rendering, and share links
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Terminal rendering and UI
//! - `share.rs`: Outbound share-link construction

pub mod display;
pub mod input;
pub mod share;
