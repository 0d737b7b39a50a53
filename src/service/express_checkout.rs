//! Express checkout sessions

use crate::types::{ApiResponse, RequestDescriptor};
use crate::{ApiClient, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Operations on `/express-checkout`
#[derive(Debug, Clone)]
pub struct ExpressCheckoutService {
    client: Arc<ApiClient>,
    operation_index: u32,
}

impl ExpressCheckoutService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            operation_index: 0,
        }
    }

    /// Copy of this service tagging its requests with `operation_index`
    pub fn with_operation_index(&self, operation_index: u32) -> Self {
        Self {
            client: self.client.clone(),
            operation_index,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn create_session_request<B: Serialize + ?Sized>(
        &self,
        space: u64,
        session: &B,
    ) -> Result<RequestDescriptor> {
        Ok(RequestDescriptor::post(
            "ExpressCheckoutService.PostExpressCheckoutCreateSession",
            "/express-checkout/create-session",
        )
        .content_types(["application/json"])
        .space(space)
        .json_body(session)?
        .with_operation_index(self.operation_index))
    }

    /// Create a new express checkout session
    pub async fn post_express_checkout_create_session_with_http_info<T, B>(
        &self,
        space: u64,
        session: &B,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.create_session_request(space, session)?;
        self.client.execute(request).await
    }

    /// Create a new express checkout session
    pub async fn post_express_checkout_create_session<T, B>(&self, space: u64, session: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_express_checkout_create_session_with_http_info(space, session)
            .await
            .map(ApiResponse::into_data)
    }
}
