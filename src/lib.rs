//! Library root for sshc
pub mod error;
pub mod logging;
pub mod models;

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
