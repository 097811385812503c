use crate::domain::model::Country;
use crate::domain::ports::{ConfigProvider, CountryGateway};
use crate::utils::error::{AppError, GatewayError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Gateway over the REST Countries `GET /name/{country}` endpoint.
#[derive(Debug, Clone)]
pub struct RestCountriesGateway {
    client: Client,
    base_url: Url,
}

impl RestCountriesGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| AppError::ConfigError {
            message: format!("Invalid base URL {}: {}", base_url, e),
        })?;
        let client = Client::builder()
            .user_agent(concat!("country-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url())
    }

    /// `{base_url}/name/{name}` with `name` percent-encoded as one path segment.
    pub fn lookup_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("name").push(name);
        }
        url
    }
}

#[async_trait]
impl CountryGateway for RestCountriesGateway {
    async fn get_country_by_name(&self, name: &str) -> std::result::Result<Vec<Country>, GatewayError> {
        let url = self.lookup_url(name);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| GatewayError::Transport {
            message: e.to_string(),
        })?;

        serde_json::from_slice::<Vec<Country>>(&body).map_err(|e| GatewayError::Decode {
            status: status.as_u16(),
            message: e.to_string(),
        })
    }
}
