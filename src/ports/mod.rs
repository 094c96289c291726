//! Ports - Trait definitions for everything outside the domain.

pub mod media;
pub mod queue;
pub mod repository;
