//! Snippetbox web application: server wiring, routing, pages.

pub mod app;
pub mod config;
pub mod context;
pub mod login;
pub mod middleware;
