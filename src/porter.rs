//! The porter facade.
//!
//! A [`Porter`] is a caller-constructed front end for one gateway
//! configuration. It owns the configuration and a cache of configured gateway
//! handles per endpoint id, builds the per-phase request entities, and
//! assembles the matching controllers. There is no shared global instance;
//! pass the porter by reference to whoever needs it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    config::PorterConfig,
    controller::{AuthorizeController, CaptureController, ConfirmController},
    entity::{
        AuthorizeRequestData, CaptureRequestData, ConfirmRequestData, OffsiteCustomer,
        ResponseData,
    },
    error::{PorterError, Result},
    gateway::{GatewayApi, GatewayData, RestGateway},
    service::ConfirmResponseService,
};

/// Endpoint id the controller builders resolve when the caller does not pick
/// one explicitly.
pub const DEFAULT_ENDPOINT_ID: &str = "default";

/// Front end for driving offsite payments through one gateway configuration.
///
/// # Examples
///
/// ```no_run
/// use paypal_porter::Porter;
/// use rust_decimal::Decimal;
///
/// # async fn example() -> paypal_porter::Result<()> {
/// let porter = Porter::from_toml(r#"
///     gateway_name = "PayPal"
///     environment = "sandbox"
///
///     [offsite_urls]
///     return_url = "https://shop.example.com/checkout/return"
///     cancel_url = "https://shop.example.com/checkout/cancel"
///
///     [endpoints.default]
///     client_id = "client-id"
///     secret = "client-secret"
/// "#)?;
///
/// let mut authorize = porter.authorize_controller("T-1", Decimal::new(1999, 2), "USD")?;
/// let response = authorize.send().await?;
/// println!("approval reference: {:?}", response.transaction_reference());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Porter {
    config: PorterConfig,
    gateways: Mutex<HashMap<String, Arc<GatewayData>>>,
}

impl Porter {
    /// Creates a porter from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] if validation fails.
    pub fn new(config: PorterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, gateways: Mutex::new(HashMap::new()) })
    }

    /// Creates a porter from a TOML configuration string.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] if parsing or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Self::new(PorterConfig::from_toml(toml_str)?)
    }

    /// Creates a porter with a caller-supplied gateway API for the default
    /// endpoint.
    ///
    /// This is the seam for tests and for alternative transports: the
    /// injected API is bound to [`DEFAULT_ENDPOINT_ID`] in place of the
    /// [`RestGateway`] the porter would otherwise construct.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] if validation fails.
    pub fn with_gateway_api(config: PorterConfig, api: Arc<dyn GatewayApi>) -> Result<Self> {
        let porter = Self::new(config)?;
        let data = Arc::new(GatewayData::new(
            api,
            porter.config.gateway_name.clone(),
            porter.config.environment,
        ));
        porter
            .gateways
            .lock()
            .expect("gateway cache mutex should not be poisoned")
            .insert(DEFAULT_ENDPOINT_ID.to_owned(), data);
        Ok(porter)
    }

    /// The porter's configuration.
    #[must_use]
    pub fn config(&self) -> &PorterConfig {
        &self.config
    }

    /// Resolves the gateway handle for an endpoint id, building and caching
    /// it on first use.
    ///
    /// Repeated calls for the same endpoint id share one configured client.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] when the endpoint id has no
    /// credentials configured or the client cannot be built.
    pub fn gateway_data(&self, endpoint_id: &str) -> Result<Arc<GatewayData>> {
        let mut cache = self
            .gateways
            .lock()
            .expect("gateway cache mutex should not be poisoned");

        if let Some(data) = cache.get(endpoint_id) {
            return Ok(Arc::clone(data));
        }

        let credentials = self.config.endpoints.get(endpoint_id).ok_or_else(|| {
            PorterError::Configuration(format!(
                "no gateway endpoint configured for '{endpoint_id}'"
            ))
        })?;

        debug!(endpoint_id, environment = %self.config.environment, "configuring gateway API");
        let api = RestGateway::new(self.config.environment, credentials.clone())?;
        let data = Arc::new(GatewayData::new(
            Arc::new(api),
            self.config.gateway_name.clone(),
            self.config.environment,
        ));
        cache.insert(endpoint_id.to_owned(), Arc::clone(&data));
        Ok(data)
    }

    /// Builds an authorize controller for the default endpoint.
    ///
    /// The request entity gets the configured offsite redirect URLs and the
    /// three scalar fields verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] when no default endpoint can be
    /// resolved.
    pub fn authorize_controller(
        &self,
        transaction_id: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<AuthorizeController> {
        let gateway = self.gateway_data(DEFAULT_ENDPOINT_ID)?;

        let mut request = AuthorizeRequestData::new(self.config.offsite_urls.clone());
        request.set_transaction_id(transaction_id);
        request.set_amount(amount);
        request.set_currency(currency);

        Ok(AuthorizeController::new(gateway, request))
    }

    /// Builds a confirm controller for the default endpoint.
    ///
    /// `reference_id` must be the gateway-assigned reference from a prior
    /// authorize response; `payer_id` comes from the gateway's return
    /// redirect.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] when no default endpoint can be
    /// resolved.
    pub fn confirm_controller(
        &self,
        transaction_id: &str,
        amount: Decimal,
        currency: &str,
        reference_id: &str,
        payer_id: &str,
    ) -> Result<ConfirmController> {
        let gateway = self.gateway_data(DEFAULT_ENDPOINT_ID)?;

        let mut request = ConfirmRequestData::new(self.config.offsite_urls.clone());
        request.set_transaction_id(transaction_id);
        request.set_amount(amount);
        request.set_currency(currency);
        request.set_transaction_reference(reference_id);
        request.set_payer_id(payer_id);

        Ok(ConfirmController::new(gateway, request))
    }

    /// Builds a capture controller for the default endpoint.
    ///
    /// `reference_id` must be the gateway-assigned reference from a prior
    /// confirm response.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] when no default endpoint can be
    /// resolved.
    pub fn capture_controller(
        &self,
        transaction_id: &str,
        amount: Decimal,
        currency: &str,
        reference_id: &str,
    ) -> Result<CaptureController> {
        let gateway = self.gateway_data(DEFAULT_ENDPOINT_ID)?;

        let mut request = CaptureRequestData::new();
        request.set_transaction_id(transaction_id);
        request.set_amount(amount);
        request.set_currency(currency);
        request.set_transaction_reference(reference_id);

        Ok(CaptureController::new(gateway, request))
    }

    /// Derives the offsite customer identity from a completed confirm
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::MissingCustomerData`] when the response lacks
    /// payer information, an email, or an address.
    pub fn offsite_customer(&self, response: &ResponseData) -> Result<OffsiteCustomer> {
        ConfirmResponseService.offsite_customer(response)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::Value;

    use super::*;
    use crate::{entity::Phase, entity::RequestData, gateway::ChargeParams};

    const CONFIG: &str = r#"
        gateway_name = "PayPal"
        environment = "sandbox"

        [offsite_urls]
        return_url = "https://shop.example.com/checkout/return"
        cancel_url = "https://shop.example.com/checkout/cancel"

        [endpoints.default]
        client_id = "client-id"
        secret = "client-secret"
    "#;

    struct NullGateway;

    #[async_trait::async_trait]
    impl GatewayApi for NullGateway {
        async fn authorize(&self, _params: &ChargeParams) -> crate::error::Result<Value> {
            Ok(Value::Null)
        }

        async fn confirm(&self, _params: &ChargeParams) -> crate::error::Result<Value> {
            Ok(Value::Null)
        }

        async fn capture(&self, _params: &ChargeParams) -> crate::error::Result<Value> {
            Ok(Value::Null)
        }
    }

    fn porter() -> Porter {
        let config = PorterConfig::from_toml(CONFIG).unwrap();
        Porter::with_gateway_api(config, Arc::new(NullGateway)).unwrap()
    }

    #[test]
    fn test_authorize_controller_fields_set_verbatim() {
        let porter = porter();
        let controller = porter
            .authorize_controller("T-1", Decimal::new(1999, 2), "USD")
            .unwrap();

        let request = controller.request();
        assert_eq!(request.phase(), Phase::Authorize);
        assert_eq!(request.transaction_id(), "T-1");
        assert_eq!(request.amount(), Decimal::new(1999, 2));
        assert_eq!(request.currency(), "USD");
        assert_eq!(
            request.offsite_urls().return_url,
            "https://shop.example.com/checkout/return"
        );
    }

    #[test]
    fn test_confirm_controller_carries_reference_and_payer() {
        let porter = porter();
        let controller = porter
            .confirm_controller("T-1", Decimal::new(1999, 2), "USD", "PAY-1", "PAYER-9")
            .unwrap();

        let request = controller.request();
        assert_eq!(request.transaction_reference(), "PAY-1");
        assert_eq!(request.payer_id(), "PAYER-9");
    }

    #[test]
    fn test_capture_controller_carries_reference() {
        let porter = porter();
        let controller = porter
            .capture_controller("T-1", Decimal::new(1999, 2), "USD", "PAY-EXEC-1")
            .unwrap();

        assert_eq!(controller.request().transaction_reference(), "PAY-EXEC-1");
    }

    #[test]
    fn test_unknown_endpoint_is_configuration_error() {
        let porter = porter();
        let err = porter.gateway_data("backup").unwrap_err();
        assert!(matches!(err, PorterError::Configuration(_)));
        assert!(err.to_string().contains("backup"));
    }

    #[test]
    fn test_missing_default_endpoint_fails_builders() {
        let toml = CONFIG.replace("endpoints.default", "endpoints.secondary");
        let porter = Porter::from_toml(&toml).unwrap();
        let err = porter
            .authorize_controller("T-1", Decimal::ONE, "USD")
            .unwrap_err();
        assert!(matches!(err, PorterError::Configuration(_)));
    }

    #[test]
    fn test_gateway_data_is_cached_per_endpoint() {
        let config = PorterConfig::from_toml(CONFIG).unwrap();
        let porter = Porter::new(config).unwrap();

        let first = porter.gateway_data("default").unwrap();
        let second = porter.gateway_data("default").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_injected_gateway_serves_default_endpoint() {
        let porter = porter();
        let data = porter.gateway_data(DEFAULT_ENDPOINT_ID).unwrap();
        assert_eq!(data.gateway_name(), "PayPal");
    }

    proptest! {
        #[test]
        fn prop_authorize_builder_sets_fields_verbatim(
            transaction_id in "[A-Za-z0-9-]{1,24}",
            cents in 0i64..100_000_000,
            currency in "[A-Z]{3}",
        ) {
            let porter = porter();
            let amount = Decimal::new(cents, 2);
            let controller = porter
                .authorize_controller(&transaction_id, amount, &currency)
                .unwrap();

            let request = controller.request();
            prop_assert_eq!(request.phase(), Phase::Authorize);
            prop_assert_eq!(request.transaction_id(), transaction_id.as_str());
            prop_assert_eq!(request.amount(), amount);
            prop_assert_eq!(request.currency(), currency.as_str());
        }
    }
}
