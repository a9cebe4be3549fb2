//! Internal modules for the Pig console front end.
//!
//! This library provides the welcome banner, stdin prompts, and player
//! setup used by the pd_cli binary.

pub mod console;
