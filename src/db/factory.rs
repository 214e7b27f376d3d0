//! Repository factory.
//!
//! Central place for constructing repository instances, either directly,
//! from configuration, or from the environment.

use std::sync::Arc;

use log::info;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::config::PlanningConfig;

/// Supported repository backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory store for tests and development.
    Local,
}

impl RepositoryType {
    /// Parse a backend name, case-insensitive.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(RepositoryType::Local),
            other => Err(format!("Unknown repository type: {}", other)),
        }
    }

    /// Backend named by the `REPOSITORY_TYPE` environment variable. Falls
    /// back to [`RepositoryType::Local`] when the variable is unset.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(value) => Self::from_str(&value),
            Err(_) => Ok(RepositoryType::Local),
        }
    }
}

/// Factory for constructing repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Construct a repository of the given type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn FullRepository> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
        }
    }

    pub fn create_local() -> Arc<dyn FullRepository> {
        info!("Creating local in-memory repository");
        Arc::new(LocalRepository::new())
    }

    /// Construct the repository named in the configuration.
    pub fn from_config(config: &PlanningConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config
            .repository_type()
            .map_err(RepositoryError::ConfigurationError)?;
        Ok(Self::create(repo_type))
    }

    /// Construct the repository named by `REPOSITORY_TYPE`.
    pub fn from_env() -> Result<Arc<dyn FullRepository>, String> {
        Ok(Self::create(RepositoryType::from_env()?))
    }
}

/// Fluent builder over the factory.
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Local,
        }
    }

    pub fn with_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    pub fn from_config(mut self, config: &PlanningConfig) -> Result<Self, String> {
        self.repo_type = config.repository_type()?;
        Ok(self)
    }

    pub fn build(self) -> Arc<dyn FullRepository> {
        RepositoryFactory::create(self.repo_type)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::EventRepository;

    #[test]
    fn test_from_str_parses_known_names() {
        assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("LOCAL").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("memory").unwrap(), RepositoryType::Local);
    }

    #[test]
    fn test_from_str_rejects_unknown_names() {
        assert!(RepositoryType::from_str("postgres").is_err());
        assert!(RepositoryType::from_str("").is_err());
    }

    #[tokio::test]
    async fn test_builder_produces_healthy_repository() {
        let repo = RepositoryBuilder::new()
            .with_type(RepositoryType::Local)
            .build();
        assert!(repo.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_backend() {
        let config = PlanningConfig::default();
        let repo = RepositoryFactory::from_config(&config).unwrap();
        assert!(repo.health_check().await.is_ok());
    }
}
