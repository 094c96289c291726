//! Domain layer - Pure business logic.

// Job definitions for the background concat queue
pub mod jobs;

// File naming rules for the flat storage directory
pub mod naming;

// Video records and their edit history
pub mod video;
