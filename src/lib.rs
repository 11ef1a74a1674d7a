//! School records server library.
//!
//! Students, faculties and student avatars over a relational store, exposed
//! through an actix-web API.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
