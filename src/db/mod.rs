//! Storage layer.
//!
//! Services talk to storage through the repository traits only; the factory
//! picks the concrete backend at startup. Callers hold whichever repository
//! they constructed and pass it down explicitly.
//!
//! ```text
//!   ┌───────────────────────────┐
//!   │         Services          │
//!   └─────────────┬─────────────┘
//!                 │
//!   ┌─────────────▼─────────────┐
//!   │   FullRepository traits   │
//!   └─────────────┬─────────────┘
//!                 │
//!   ┌─────────────▼─────────────┐
//!   │      LocalRepository      │
//!   └───────────────────────────┘
//! ```

pub mod etag;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    EventRepository, FullRepository, LockRepository, PlanningRepository, RepositoryError,
    RepositoryResult,
};
