//! splitnav - Responsive Stack Navigation
//!
//! A stack-navigation layer for terminal applications with a responsive
//! split-pane layout, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
