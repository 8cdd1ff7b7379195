//! Subnetworks API, in particular the "list usable" capability
//!
//! A usable subnetwork is one the project is permitted to use, possibly
//! shared from another project, as reported by
//! `GET /projects/{project}/aggregated/subnetworks/listUsable`.

use crate::api::{common::ApiQueryParams, error::ApiError, Client};
use serde::Deserialize;

/// One item of a listUsable response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsableSubnetwork {
    /// Self link of the subnetwork, its canonical identity.
    pub subnetwork: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub ip_cidr_range: String,
    #[serde(default)]
    pub secondary_ip_ranges: Vec<UsableSubnetworkSecondaryRange>,
}

/// Additional named CIDR block attached to a subnetwork.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsableSubnetworkSecondaryRange {
    #[serde(default)]
    pub range_name: String,
    #[serde(default)]
    pub ip_cidr_range: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsableSubnetworksResponse {
    #[serde(default)]
    pub items: Vec<UsableSubnetwork>,
    /// Empty when there are no further pages.
    #[serde(default)]
    pub next_page_token: String,
}

/// Subnetworks API scoped to a project.
pub struct SubnetworksApi<'a> {
    client: &'a Client,
    project: String,
}

impl<'a> SubnetworksApi<'a> {
    pub fn new(client: &'a Client, project: &str) -> Self {
        Self {
            client,
            project: project.to_string(),
        }
    }

    /// GET /projects/{project}/aggregated/subnetworks/listUsable
    ///
    /// Fetches a single page. Filter and page token are passed through
    /// verbatim, empty values included.
    pub async fn list_usable(
        &self,
        filter: &str,
        page_token: &str,
    ) -> Result<ListUsableSubnetworksResponse, ApiError> {
        let path = format!("/projects/{}/aggregated/subnetworks/listUsable", self.project);
        let params = ApiQueryParams::new()
            .add("filter", filter)
            .add("pageToken", page_token);
        self.client.get_with_params(&path, &params).await
    }
}
