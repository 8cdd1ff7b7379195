pub mod api;
pub mod data_sources;
pub mod provider_data;

pub use provider_data::GoogleProviderData;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::data_source::DataSourceWithConfigure;
use tfcore::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, DataSourceFactory, Provider,
    ProviderMetadataRequest, ProviderMetadataResponse, ProviderSchemaRequest,
    ProviderSchemaResponse, ValidateProviderConfigRequest, ValidateProviderConfigResponse,
};
use tfcore::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostic, ServerCapabilities};

pub struct GoogleProvider {
    provider_data: Option<GoogleProviderData>,
}

impl Default for GoogleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleProvider {
    pub fn new() -> Self {
        Self {
            provider_data: None,
        }
    }
}

fn config_or_env(
    config: &tfcore::types::Config,
    attribute: &str,
    env_var: &str,
) -> Option<String> {
    config
        .get_string(&AttributePath::new(attribute))
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|v| !v.is_empty()))
}

#[async_trait]
impl Provider for GoogleProvider {
    fn type_name(&self) -> &str {
        "google"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: self.type_name().to_string(),
            server_capabilities: ServerCapabilities {
                plan_destroy: false,
                get_provider_schema_optional: false,
                move_resource_state: false,
            },
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ProviderSchemaRequest,
    ) -> ProviderSchemaResponse {
        let schema = SchemaBuilder::new()
            .version(0)
            .description("Google Cloud Platform provider")
            .attribute(
                AttributeBuilder::new("project", AttributeType::String)
                    .description("Default project for data sources that do not set one")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("access_token", AttributeType::String)
                    .description("OAuth2 access token used to authenticate API requests")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("endpoint", AttributeType::String)
                    .description("Custom Compute API endpoint")
                    .optional()
                    .build(),
            )
            .build();

        ProviderSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let mut diagnostics = vec![];

        let project = config_or_env(&request.config, "project", "GOOGLE_PROJECT");
        let access_token =
            config_or_env(&request.config, "access_token", "GOOGLE_OAUTH_ACCESS_TOKEN");
        let endpoint = config_or_env(&request.config, "endpoint", "GOOGLE_COMPUTE_ENDPOINT")
            .unwrap_or_else(|| api::DEFAULT_ENDPOINT.to_string());

        let Some(access_token) = access_token else {
            diagnostics.push(Diagnostic::error(
                "access_token is required",
                "Set access_token in the provider config or the GOOGLE_OAUTH_ACCESS_TOKEN env var",
            ));
            return ConfigureProviderResponse {
                diagnostics,
                provider_data: None,
            };
        };

        match api::Client::new(&endpoint, &access_token) {
            Ok(client) => {
                let data = GoogleProviderData::new(client, project);
                self.provider_data = Some(data.clone());
                ConfigureProviderResponse {
                    diagnostics,
                    provider_data: Some(
                        Arc::new(data) as Arc<dyn std::any::Any + Send + Sync>
                    ),
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to create API client",
                    format!("{}", e),
                ));
                ConfigureProviderResponse {
                    diagnostics,
                    provider_data: None,
                }
            }
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        _request: ValidateProviderConfigRequest,
    ) -> ValidateProviderConfigResponse {
        ValidateProviderConfigResponse {
            diagnostics: vec![],
        }
    }

    fn data_sources(&self) -> HashMap<String, DataSourceFactory> {
        let mut factories: HashMap<String, DataSourceFactory> = HashMap::new();
        factories.insert(
            "google_compute_usable_subnetworks".to_string(),
            Box::new(|| {
                Box::new(data_sources::UsableSubnetworksDataSource::new())
                    as Box<dyn DataSourceWithConfigure>
            }),
        );
        factories
    }
}
