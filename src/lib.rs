//! Todo Widget
//!
//! Client-side todo lists mirrored to `localStorage`.

pub mod models;
pub mod storage;
pub mod confirm;
pub mod store;
pub mod history;
pub mod context;
pub mod components;
pub mod app;
