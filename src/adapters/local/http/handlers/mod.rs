//! One module per endpoint.

pub mod concat;
pub mod download;
pub mod info;
pub mod jobs;
pub mod perform_all;
pub mod trim;
pub mod upload;

mod multipart;
