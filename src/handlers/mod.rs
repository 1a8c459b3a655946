// src/handlers/mod.rs

pub mod auth;
pub mod posts;
pub mod themes;
