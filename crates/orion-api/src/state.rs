use orion_llm::LLMClient;
use orion_persist::PersistenceClient;
use std::sync::Arc;

use crate::config::Config;
use crate::relay::ConversationRelay;

/// Shared application state passed to all handlers
///
/// Everything is behind `Arc` and read-only; the store behind `persist` is
/// the only mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub persist: Arc<dyn PersistenceClient>,
    pub relay: Arc<ConversationRelay>,
}

impl AppState {
    pub fn new(
        config: Config,
        persist: Arc<dyn PersistenceClient>,
        llm_client: Arc<dyn LLMClient>,
    ) -> Self {
        let relay = ConversationRelay::new(
            llm_client,
            persist.clone(),
            config.relay.clone(),
            config.image.clone(),
        );
        Self {
            config: Arc::new(config),
            persist,
            relay: Arc::new(relay),
        }
    }
}
