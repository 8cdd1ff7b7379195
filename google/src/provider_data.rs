//! Provider data structure passed to data sources

use crate::api::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct GoogleProviderData {
    pub client: Arc<Client>,
    /// Provider-level default project, used when a data source does not
    /// specify one.
    pub project: Option<String>,
}

impl GoogleProviderData {
    pub fn new(client: Client, project: Option<String>) -> Self {
        Self {
            client: Arc::new(client),
            project,
        }
    }
}
