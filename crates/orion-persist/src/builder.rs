use std::sync::Arc;

use crate::dbs::memory::InMemoryPersistenceClient;
use crate::dbs::postgrest::PostgrestPersistenceClient;
use crate::error::{PersistError, Result};
use crate::trait_client::PersistenceClient;

/// Where conversation rows live
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Memory,
    Postgrest {
        url: String,
        service_key: String,
    },
    #[cfg(feature = "mongodb")]
    MongoDb {
        uri: String,
        database: String,
    },
}

pub struct PersistClientBuilder {
    backend: Option<StorageBackend>,
}

impl PersistClientBuilder {
    pub fn new() -> Self {
        Self { backend: None }
    }

    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn memory(self) -> Self {
        self.backend(StorageBackend::Memory)
    }

    pub fn postgrest(self, url: impl Into<String>, service_key: impl Into<String>) -> Self {
        self.backend(StorageBackend::Postgrest {
            url: url.into(),
            service_key: service_key.into(),
        })
    }

    pub async fn build(self) -> Result<Arc<dyn PersistenceClient>> {
        let backend = self
            .backend
            .ok_or_else(|| PersistError::Internal("storage backend is required".to_string()))?;

        let client: Arc<dyn PersistenceClient> = match backend {
            StorageBackend::Memory => Arc::new(InMemoryPersistenceClient::new()),
            StorageBackend::Postgrest { url, service_key } => {
                if url.is_empty() {
                    return Err(PersistError::Internal("PostgREST url is required".to_string()));
                }
                Arc::new(PostgrestPersistenceClient::new(url, &service_key)?)
            }
            #[cfg(feature = "mongodb")]
            StorageBackend::MongoDb { uri, database } => Arc::new(
                crate::dbs::mongo::MongoPersistenceClient::connect(&uri, &database).await?,
            ),
        };

        tracing::debug!(backend = client.backend_name(), "persistence client ready");
        Ok(client)
    }
}

impl Default for PersistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
