//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and remote persistence into the narrow
//!   operation set the presentation layer calls.
//! - Keep presentation decoupled from sync and storage details.

pub mod log_service;
