//! Application layer - Services that use ports.

// Upload registration, trim, download resolution, re-execution
pub mod editor;

// Media tool invocations with manifest handling and output checks
pub mod invoker;

// Background concat queue consumer
pub mod worker;
