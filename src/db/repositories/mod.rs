//! Concrete repository implementations.

pub mod local;

pub use local::LocalRepository;
