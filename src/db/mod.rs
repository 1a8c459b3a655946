// src/db/mod.rs
//
// Repository layer: every persistence side effect (id assignment, timestamp
// refresh, cascade) happens in these functions, behind plain SQL.

pub mod posts;
pub mod themes;
pub mod users;
