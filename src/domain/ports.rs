use crate::domain::model::Country;
use crate::utils::error::GatewayError;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote source of country records.
#[async_trait]
pub trait CountryGateway: Send + Sync {
    async fn get_country_by_name(&self, name: &str) -> Result<Vec<Country>, GatewayError>;
}

#[async_trait]
impl<T: CountryGateway + ?Sized> CountryGateway for Arc<T> {
    async fn get_country_by_name(&self, name: &str) -> Result<Vec<Country>, GatewayError> {
        (**self).get_country_by_name(name).await
    }
}

/// The single text output of the search screen. Last write wins.
pub trait DisplaySurface: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Short transient messages shown apart from the display surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
}
