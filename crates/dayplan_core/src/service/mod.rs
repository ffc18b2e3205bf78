//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and snapshot persistence.
//! - Keep rendering layers decoupled from storage details.

pub mod planner_service;
