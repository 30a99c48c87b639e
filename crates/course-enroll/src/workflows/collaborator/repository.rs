use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::enrollment::{Application, ApplicationId};

/// Storage for received applications. Implementations must reject a second
/// application carrying an id that is already stored.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("application id already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keyed (and therefore uniquely indexed) by application id.
#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(application.application_id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.application_id().clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.len())
    }
}
