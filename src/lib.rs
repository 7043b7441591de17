//! SmartFarm: user accounts, a browser-style session and per-user pesticide
//! usage logs persisted to a key-value store, plus simulated weather and
//! plant-health widgets, served as a small JSON API.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod guard;
pub mod logs;
pub mod plant_health;
pub mod plants;
pub mod state;
pub mod storage;
pub mod weather;
