//! HTTP handlers

pub mod admin;
pub mod applications;
pub mod auth;
pub mod deals;
pub mod health;
