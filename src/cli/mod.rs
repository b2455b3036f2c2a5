//! CLI infrastructure for the ttt-eval tool
//!
//! This module provides the command-line interface for evaluating game
//! record datasets, generating new ones and solving single positions.

pub mod commands;
pub mod config;
pub mod output;
