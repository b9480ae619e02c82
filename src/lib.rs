//! Snake Arcade - grid snake for the terminal
//!
//! This library provides:
//! - Core game logic with an explicit state machine (game module)
//! - Tick scheduling behind an injectable trait (schedule module)
//! - High-score persistence (storage module)
//! - The command surface a UI drives (session module)
//! - Keyboard and pointer input mapping, TUI rendering, and the interactive mode

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod schedule;
pub mod session;
pub mod storage;
