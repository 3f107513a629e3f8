pub mod config;
pub mod context;
pub mod error;
pub mod playlist;
pub mod rotation;
pub mod store;
pub mod web;
