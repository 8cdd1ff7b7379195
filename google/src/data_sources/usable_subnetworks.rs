//! Usable subnetworks data source implementation
//!
//! Lists every subnetwork the project is permitted to use, paging through
//! the Compute `listUsable` API and flattening each item into the declared
//! attribute schema.

use async_trait::async_trait;
use std::collections::HashMap;
use tfcore::context::Context;
use tfcore::data_source::{
    ConfigureDataSourceRequest, ConfigureDataSourceResponse, DataSource, DataSourceMetadataRequest,
    DataSourceMetadataResponse, DataSourceSchemaRequest, DataSourceSchemaResponse,
    DataSourceWithConfigure, ReadDataSourceRequest, ReadDataSourceResponse,
    ValidateDataSourceConfigRequest, ValidateDataSourceConfigResponse,
};
use tfcore::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

use crate::api::self_link::{SelfLinkError, SubnetworkSelfLink};
use crate::api::subnetworks::{UsableSubnetwork, UsableSubnetworkSecondaryRange};

#[derive(Default)]
pub struct UsableSubnetworksDataSource {
    provider_data: Option<crate::GoogleProviderData>,
}

impl UsableSubnetworksDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for UsableSubnetworksDataSource {
    fn type_name(&self) -> &str {
        "google_compute_usable_subnetworks"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: DataSourceMetadataRequest,
    ) -> DataSourceMetadataResponse {
        DataSourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: DataSourceSchemaRequest,
    ) -> DataSourceSchemaResponse {
        let secondary_range_type = AttributeType::Object(HashMap::from([
            ("range_name".to_string(), AttributeType::String),
            ("ip_cidr_range".to_string(), AttributeType::String),
        ]));
        let subnetwork_type = AttributeType::Object(HashMap::from([
            ("name".to_string(), AttributeType::String),
            ("region".to_string(), AttributeType::String),
            ("project".to_string(), AttributeType::String),
            ("self_link".to_string(), AttributeType::String),
            ("ip_cidr_range".to_string(), AttributeType::String),
            ("network".to_string(), AttributeType::String),
            (
                "secondary_ip_range".to_string(),
                AttributeType::List(Box::new(secondary_range_type)),
            ),
        ]));

        let schema = SchemaBuilder::new()
            .version(0)
            .description("Lists subnetworks usable by the given project")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("The data source ID")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("project", AttributeType::String)
                    .description("The project whose usable subnetworks are listed")
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("filter", AttributeType::String)
                    .description("Server-side filter expression, passed through verbatim")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "subnetworks",
                    AttributeType::List(Box::new(subnetwork_type)),
                )
                .description("All usable subnetworks, in API order")
                .computed()
                .build(),
            )
            .build();

        DataSourceSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        _request: ValidateDataSourceConfigRequest,
    ) -> ValidateDataSourceConfigResponse {
        ValidateDataSourceConfigResponse {
            diagnostics: vec![],
        }
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = vec![];

        let Some(provider_data) = &self.provider_data else {
            diagnostics.push(Diagnostic::error(
                "Provider not configured",
                "Provider data was not properly configured",
            ));
            return ReadDataSourceResponse {
                state: DynamicValue::null(),
                diagnostics,
                deferred: None,
            };
        };

        let project = request
            .config
            .get_string(&AttributePath::new("project"))
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| provider_data.project.clone());
        let Some(project) = project else {
            diagnostics.push(
                Diagnostic::error(
                    "project is required",
                    "Set project on the data source or a default project on the provider",
                )
                .with_attribute(AttributePath::new("project")),
            );
            return ReadDataSourceResponse {
                state: DynamicValue::null(),
                diagnostics,
                deferred: None,
            };
        };

        let filter = request
            .config
            .get_string(&AttributePath::new("filter"))
            .unwrap_or_default();

        tracing::debug!(
            "Reading usable subnetworks for project {} (filter: {:?})",
            project,
            filter
        );

        let api = provider_data.client.subnetworks(&project);
        let mut items = Vec::new();
        let mut token = String::new();
        loop {
            let page = match api.list_usable(&filter, &token).await {
                Ok(page) => page,
                Err(e) => {
                    diagnostics.push(Diagnostic::error(
                        "Error retrieving usable subnetworks",
                        format!("{}", e),
                    ));
                    return ReadDataSourceResponse {
                        state: DynamicValue::null(),
                        diagnostics,
                        deferred: None,
                    };
                }
            };
            items.extend(page.items);
            token = page.next_page_token;
            if token.is_empty() {
                break;
            }
        }

        let subnetworks = match flatten_usable_subnetworks(&items) {
            Ok(list) => list,
            Err(e) => {
                diagnostics.push(
                    Diagnostic::error("Error reading usable subnetworks", format!("{}", e))
                        .with_attribute(AttributePath::new("subnetworks")),
                );
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                    deferred: None,
                };
            }
        };

        let mut state = DynamicValue::null();
        let assigned = (|| {
            state.set_string(&AttributePath::new("id"), project.clone())?;
            state.set_string(&AttributePath::new("project"), project)?;
            state.set_string(&AttributePath::new("filter"), filter)?;
            state.set_list(&AttributePath::new("subnetworks"), subnetworks)
        })();
        if let Err(e) = assigned {
            diagnostics.push(Diagnostic::error(
                "Error setting subnetworks",
                format!("{}", e),
            ));
            return ReadDataSourceResponse {
                state: DynamicValue::null(),
                diagnostics,
                deferred: None,
            };
        }

        ReadDataSourceResponse {
            state,
            diagnostics,
            deferred: None,
        }
    }
}

#[async_trait]
impl DataSourceWithConfigure for UsableSubnetworksDataSource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        let mut diagnostics = vec![];

        match request.provider_data {
            Some(data) => match data.downcast_ref::<crate::GoogleProviderData>() {
                Some(provider_data) => {
                    self.provider_data = Some(provider_data.clone());
                }
                None => {
                    tracing::error!("Failed to downcast provider data to GoogleProviderData");
                    diagnostics.push(Diagnostic::error(
                        "Invalid provider data",
                        "Failed to extract GoogleProviderData from provider data",
                    ));
                }
            },
            None => {
                tracing::warn!("No provider data provided to usable subnetworks data source");
                diagnostics.push(Diagnostic::error(
                    "No provider data",
                    "No provider data was provided to the data source",
                ));
            }
        }

        ConfigureDataSourceResponse { diagnostics }
    }
}

/// One-to-one, order-preserving transform of API items into attribute
/// records. The self link is decomposed once; a malformed link fails the
/// whole transform.
fn flatten_usable_subnetworks(items: &[UsableSubnetwork]) -> Result<Vec<Dynamic>, SelfLinkError> {
    items
        .iter()
        .map(|item| {
            let parsed: SubnetworkSelfLink = item.subnetwork.parse()?;
            Ok(Dynamic::Map(HashMap::from([
                ("name".to_string(), Dynamic::String(parsed.name)),
                ("region".to_string(), Dynamic::String(parsed.region)),
                ("project".to_string(), Dynamic::String(parsed.project)),
                (
                    "self_link".to_string(),
                    Dynamic::String(item.subnetwork.clone()),
                ),
                (
                    "ip_cidr_range".to_string(),
                    Dynamic::String(item.ip_cidr_range.clone()),
                ),
                ("network".to_string(), Dynamic::String(item.network.clone())),
                (
                    "secondary_ip_range".to_string(),
                    Dynamic::List(flatten_secondary_ranges(&item.secondary_ip_ranges)),
                ),
            ])))
        })
        .collect()
}

fn flatten_secondary_ranges(ranges: &[UsableSubnetworkSecondaryRange]) -> Vec<Dynamic> {
    ranges
        .iter()
        .map(|range| {
            Dynamic::Map(HashMap::from([
                (
                    "range_name".to_string(),
                    Dynamic::String(range.range_name.clone()),
                ),
                (
                    "ip_cidr_range".to_string(),
                    Dynamic::String(range.ip_cidr_range.clone()),
                ),
            ]))
        })
        .collect()
}
