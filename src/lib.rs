//! Reelcut - Video upload, trim and concat service
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (video records, jobs, file naming)
//! - ports/: Trait definitions (media tool, repositories, job queue)
//! - adapters/: Concrete implementations (local disk, ffmpeg, in-memory state, HTTP)
//! - application/: Services over the ports (editor, invoker, concat worker)
//! - config: Environment configuration
//! - error: Error taxonomy shared by services and the HTTP layer

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use config::Config;
pub use error::{EditError, EditResult};
