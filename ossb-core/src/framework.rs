use std::sync::Arc;

use crate::config::ActionConfig;
use crate::repository::RepositoryApi;
use crate::rpc::ChainRpc;

/// Everything a donate action needs for one request.
///
/// Built per request from a configuration snapshot, so a reload never
/// changes the settings under an in-flight request.
#[derive(Clone)]
pub struct ActionProcessor {
    pub config: ActionConfig,
    pub rpc: Arc<dyn ChainRpc>,
    pub repositories: Arc<dyn RepositoryApi>,
}
