//! # Storage Module
//!
//! Persistence boundary for the project collection.
//!
//! The engine never persists anything itself. The service layer loads the
//! whole collection through [`ProjectStorage`] and writes it back after
//! every mutation. Remote spreadsheet sync and device storage live outside
//! this crate and plug in by implementing the trait.

pub mod memory;
pub mod traits;

pub use memory::InMemoryProjectRepository;
pub use traits::ProjectStorage;
