//! Subscription charges

use super::{with_expand, SortingOrder};
use crate::types::{ApiResponse, RequestDescriptor};
use crate::{ApiClient, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

const CHARGES_PATH: &str = "/subscriptions/charges";
const CHARGE_PATH: &str = "/subscriptions/charges/{id}";

/// Query parameters of the charge list operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeListOptions {
    /// Only charges with an id greater than this one
    pub after: Option<u64>,
    /// Only charges with an id less than this one
    pub before: Option<u64>,
    pub expand: Vec<String>,
    pub limit: Option<u32>,
    pub order: Option<SortingOrder>,
}

/// Query parameters of the charge search operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeSearchOptions {
    pub expand: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Sort criteria, e.g. `createdOn:DESC`
    pub order: Option<String>,
    /// Search query, e.g. `state:PENDING`
    pub query: Option<String>,
}

/// Operations on `/subscriptions/charges`
#[derive(Debug, Clone)]
pub struct SubscriptionChargesService {
    client: Arc<ApiClient>,
    operation_index: u32,
}

impl SubscriptionChargesService {
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

    fn list_request(&self, space: u64, options: &ChargeListOptions) -> RequestDescriptor {
        RequestDescriptor::get("SubscriptionChargesService.GetSubscriptionsCharges", CHARGES_PATH)
            .optional_query_param("after", options.after)
            .optional_query_param("before", options.before)
            .multi_query_param("expand", &options.expand)
            .optional_query_param("limit", options.limit)
            .optional_query_param("order", options.order)
            .space(space)
            .with_operation_index(self.operation_index)
    }

    fn get_request(&self, id: u64, space: u64, expand: &[&str]) -> RequestDescriptor {
        with_expand(
            RequestDescriptor::get("SubscriptionChargesService.GetSubscriptionsChargesId", CHARGE_PATH)
                .path_param("id", id),
            expand,
        )
        .space(space)
        .with_operation_index(self.operation_index)
    }

    fn search_request(&self, space: u64, options: &ChargeSearchOptions) -> RequestDescriptor {
        RequestDescriptor::get(
            "SubscriptionChargesService.GetSubscriptionsChargesSearch",
            "/subscriptions/charges/search",
        )
        .multi_query_param("expand", &options.expand)
        .optional_query_param("limit", options.limit)
        .optional_query_param("offset", options.offset)
        .optional_query_param("order", options.order.as_deref())
        .optional_query_param("query", options.query.as_deref())
        .space(space)
        .with_operation_index(self.operation_index)
    }

    fn create_request<B: Serialize + ?Sized>(
        &self,
        space: u64,
        charge: &B,
        expand: &[&str],
    ) -> Result<RequestDescriptor> {
        let request = RequestDescriptor::post("SubscriptionChargesService.PostSubscriptionsCharges", CHARGES_PATH)
            .content_types(["application/json"]);
        Ok(with_expand(request, expand)
            .space(space)
            .json_body(charge)?
            .with_operation_index(self.operation_index))
    }

    fn discard_request(&self, id: u64, space: u64, expand: &[&str]) -> RequestDescriptor {
        with_expand(
            RequestDescriptor::post(
                "SubscriptionChargesService.PostSubscriptionsChargesIdDiscard",
                "/subscriptions/charges/{id}/discard",
            )
            .path_param("id", id),
            expand,
        )
        .space(space)
        .with_operation_index(self.operation_index)
    }

    /// List subscription charges
    pub async fn get_subscriptions_charges_with_http_info<T: DeserializeOwned>(
        &self,
        space: u64,
        options: &ChargeListOptions,
    ) -> Result<ApiResponse<T>> {
        self.client.execute(self.list_request(space, options)).await
    }

    /// List subscription charges
    pub async fn get_subscriptions_charges<T: DeserializeOwned>(
        &self,
        space: u64,
        options: &ChargeListOptions,
    ) -> Result<T> {
        self.get_subscriptions_charges_with_http_info(space, options)
            .await
            .map(ApiResponse::into_data)
    }

    /// Retrieve a subscription charge
    pub async fn get_subscriptions_charges_id_with_http_info<T: DeserializeOwned>(
        &self,
        id: u64,
        space: u64,
        expand: &[&str],
    ) -> Result<ApiResponse<T>> {
        self.client.execute(self.get_request(id, space, expand)).await
    }

    /// Retrieve a subscription charge
    pub async fn get_subscriptions_charges_id<T: DeserializeOwned>(
        &self,
        id: u64,
        space: u64,
        expand: &[&str],
    ) -> Result<T> {
        self.get_subscriptions_charges_id_with_http_info(id, space, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Search subscription charges
    pub async fn get_subscriptions_charges_search_with_http_info<T: DeserializeOwned>(
        &self,
        space: u64,
        options: &ChargeSearchOptions,
    ) -> Result<ApiResponse<T>> {
        self.client.execute(self.search_request(space, options)).await
    }

    /// Search subscription charges
    pub async fn get_subscriptions_charges_search<T: DeserializeOwned>(
        &self,
        space: u64,
        options: &ChargeSearchOptions,
    ) -> Result<T> {
        self.get_subscriptions_charges_search_with_http_info(space, options)
            .await
            .map(ApiResponse::into_data)
    }

    /// Create a subscription charge
    pub async fn post_subscriptions_charges_with_http_info<T, B>(
        &self,
        space: u64,
        charge: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.create_request(space, charge, expand)?;
        self.client.execute(request).await
    }

    /// Create a subscription charge
    pub async fn post_subscriptions_charges<T, B>(
        &self,
        space: u64,
        charge: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_subscriptions_charges_with_http_info(space, charge, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Discard a subscription charge
    pub async fn post_subscriptions_charges_id_discard_with_http_info<T: DeserializeOwned>(
        &self,
        id: u64,
        space: u64,
        expand: &[&str],
    ) -> Result<ApiResponse<T>> {
        self.client.execute(self.discard_request(id, space, expand)).await
    }

    /// Discard a subscription charge
    pub async fn post_subscriptions_charges_id_discard<T: DeserializeOwned>(
        &self,
        id: u64,
        space: u64,
        expand: &[&str],
    ) -> Result<T> {
        self.post_subscriptions_charges_id_discard_with_http_info(id, space, expand)
            .await
            .map(ApiResponse::into_data)
    }
}
