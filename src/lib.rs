// src/lib.rs
pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod model;
pub mod state;
