//! cattery - a small REST service for cat records
//!
//! Layers, leaf first:
//! - `entity`: the Cat record and the queryable field table
//! - `repository`: SQLite and in-memory stores
//! - `service`: input validation in front of the store
//! - `dto`: wire representation
//! - `http_server`: axum routes and error mapping
//! - `cli`: config loading and process entry

pub mod cli;
pub mod dto;
pub mod entity;
pub mod http_server;
pub mod observability;
pub mod repository;
pub mod service;
