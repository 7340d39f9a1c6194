use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::viva_config::VivaConfig;
use crate::billing::application::domain::entities::{CheckoutOrder, OrderRequest, RecurringCharge};
use crate::billing::application::ports::outgoing::{PaymentGateway, PaymentGatewayError};

/// Checkout window offered to the customer, in seconds.
const PAYMENT_TIMEOUT_SECS: u32 = 1800;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderCustomer<'a> {
    email: &'a str,
    full_name: &'a str,
    request_lang: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody<'a> {
    amount: i64,
    customer_trns: &'a str,
    customer: OrderCustomer<'a>,
    payment_timeout: u32,
    preauth: bool,
    allow_recurring: bool,
    max_installments: u32,
    payment_notification: bool,
    disable_cash: bool,
    source_code: &'a str,
    merchant_trns: &'a str,
    tags: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderResponse {
    order_code: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecurringBody<'a> {
    amount: i64,
    installments: u32,
    customer_trns: &'a str,
    merchant_trns: &'a str,
    source_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecurringResponse {
    transaction_id: String,
}

#[derive(Clone, Debug)]
pub struct VivaGateway {
    config: VivaConfig,
    client: Client,
}

impl VivaGateway {
    pub fn new(config: VivaConfig) -> Result<Self, PaymentGatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentGatewayError::RequestFailed(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn order_body<'a>(&'a self, order: &'a OrderRequest) -> CreateOrderBody<'a> {
        CreateOrderBody {
            amount: order.amount_cents,
            customer_trns: &order.description,
            customer: OrderCustomer {
                email: &order.customer_email,
                full_name: order.customer_name.as_deref().unwrap_or(&order.customer_email),
                request_lang: "el-GR",
            },
            payment_timeout: PAYMENT_TIMEOUT_SECS,
            preauth: false,
            allow_recurring: order.allow_recurring,
            max_installments: 0,
            payment_notification: true,
            disable_cash: true,
            source_code: &self.config.source_code,
            merchant_trns: &order.merchant_reference,
            tags: vec!["DrugAlert", "Annual"],
        }
    }

    fn recurring_body<'a>(&'a self, charge: &'a RecurringCharge) -> RecurringBody<'a> {
        RecurringBody {
            amount: charge.amount_cents,
            installments: 0,
            customer_trns: &charge.description,
            merchant_trns: &charge.merchant_reference,
            source_code: &self.config.source_code,
        }
    }

    fn checkout_url(&self, order_code: u64) -> Result<String, PaymentGatewayError> {
        let mut url = Url::parse(self.config.environment.checkout_url())
            .map_err(|e| PaymentGatewayError::InvalidResponse(e.to_string()))?;
        url.query_pairs_mut().append_pair("ref", &order_code.to_string());
        Ok(url.to_string())
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, PaymentGatewayError> {
        let mut url = Url::parse(self.config.environment.api_url())
            .map_err(|e| PaymentGatewayError::RequestFailed(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| PaymentGatewayError::RequestFailed("API URL cannot take a path".into()))?
            .extend(segments);
        Ok(url)
    }

    async fn access_token(&self) -> Result<String, PaymentGatewayError> {
        let (client_id, client_secret) = self
            .config
            .credentials()
            .ok_or(PaymentGatewayError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}/connect/token", self.config.environment.accounts_url()))
            .basic_auth(client_id, Some(client_secret))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, "Viva token request failed");
                PaymentGatewayError::AuthenticationFailed(e.to_string())
            })?;

        response
            .json::<TokenResponse>()
            .await
            .map(|t| t.access_token)
            .map_err(|e| PaymentGatewayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PaymentGateway for VivaGateway {
    async fn create_order(&self, order: OrderRequest) -> Result<CheckoutOrder, PaymentGatewayError> {
        let token = self.access_token().await?;
        let url = self.api_url(&["checkout", "v2", "orders"])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&self.order_body(&order))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, merchant_trns = %order.merchant_reference, "Viva order request failed");
                PaymentGatewayError::RequestFailed(e.to_string())
            })?;

        let created: CreateOrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentGatewayError::InvalidResponse(e.to_string()))?;

        info!(order_code = created.order_code, merchant_trns = %order.merchant_reference, "Viva order created");

        Ok(CheckoutOrder {
            order_code: created.order_code.to_string(),
            checkout_url: self.checkout_url(created.order_code)?,
            amount_cents: order.amount_cents,
        })
    }

    async fn cancel_recurring(&self, transaction_id: &str) -> Result<(), PaymentGatewayError> {
        let token = self.access_token().await?;
        let url = self.api_url(&["api", "cards", transaction_id])?;

        self.client
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PaymentGatewayError::RequestFailed(e.to_string()))?;

        info!(%transaction_id, "Viva recurring authorisation revoked");
        Ok(())
    }

    async fn charge_recurring(&self, charge: RecurringCharge) -> Result<String, PaymentGatewayError> {
        let token = self.access_token().await?;
        let url = self.api_url(&["api", "transactions", charge.transaction_id.as_str(), "recurring"])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&self.recurring_body(&charge))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, merchant_trns = %charge.merchant_reference, "Viva recurring charge failed");
                PaymentGatewayError::RequestFailed(e.to_string())
            })?;

        let charged: RecurringResponse = response
            .json()
            .await
            .map_err(|e| PaymentGatewayError::InvalidResponse(e.to_string()))?;

        info!(
            transaction_id = %charged.transaction_id,
            merchant_trns = %charge.merchant_reference,
            "Viva recurring charge accepted"
        );
        Ok(charged.transaction_id)
    }
}
