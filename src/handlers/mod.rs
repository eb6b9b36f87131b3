//! HTTP handlers

pub mod health;
pub mod auth;
pub mod site;
pub mod settings;
