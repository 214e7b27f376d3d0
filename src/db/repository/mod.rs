//! Repository traits and error types.
//!
//! Storage is split into capability traits so services can depend on exactly
//! what they use. [`FullRepository`] bundles them for callers that need the
//! whole surface, and is implemented automatically for any type providing
//! all three.

mod error;
mod events;
mod locks;
mod planning;

pub use error::{RepositoryError, RepositoryResult};
pub use events::EventRepository;
pub use locks::LockRepository;
pub use planning::PlanningRepository;

/// Full repository: combination of all repository capabilities.
pub trait FullRepository: EventRepository + PlanningRepository + LockRepository {}

impl<T: EventRepository + PlanningRepository + LockRepository> FullRepository for T {}
