//! # pet-core
//!
//! Core library for dinopal, providing the pure pet logic shared by all
//! clients (menu-bar agent, future widgets).
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Clients can wrap with
//!   their own scheduling.
//! - **Pure**: Classification and vitals are plain functions over explicit
//!   inputs; the caller owns all I/O and all clocks.
//! - **Graceful degradation**: A missing foreground application yields the
//!   idle mood, never an error.

pub mod mood;
pub mod vitals;

pub use mood::{classify, AppIdentity, Mood, Reaction, MOOD_IDLE, REACTION_HOLD};
pub use vitals::PetVitals;
