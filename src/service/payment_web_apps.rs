//! Payment web apps: processors, connectors and the updates they report

use super::with_expand;
use crate::types::{ApiResponse, RequestDescriptor};
use crate::{ApiClient, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::sync::Arc;

const CONNECTOR_PATH: &str = "/payment/web-apps/connectors/{connectorExternalId}";
const PROCESSORS_PATH: &str = "/payment/web-apps/processors";
const PROCESSOR_PATH: &str = "/payment/web-apps/processors/{externalId}";

/// Operations on `/payment/web-apps`
///
/// External ids are caller-chosen strings; an empty one is rejected before
/// any request is sent.
#[derive(Debug, Clone)]
pub struct PaymentWebAppsService {
    client: Arc<ApiClient>,
    operation_index: u32,
}

impl PaymentWebAppsService {
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

    fn finish(&self, request: RequestDescriptor, space: u64) -> RequestDescriptor {
        request.space(space).with_operation_index(self.operation_index)
    }

    /// PATCH `path` with a JSON body, the target identified by `param`
    fn update_request<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        path: &str,
        param: (&str, &str),
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<RequestDescriptor> {
        let request = RequestDescriptor::patch(operation, path)
            .path_param(param.0, param.1)
            .content_types(["application/json"]);
        self.finish(with_expand(request, expand), space).json_body(update)
    }

    fn delete_connector_request(&self, connector_external_id: &str, space: u64) -> RequestDescriptor {
        let request = RequestDescriptor::delete(
            "PaymentWebAppsService.DeletePaymentWebAppsConnectorsConnectorExternalId",
            CONNECTOR_PATH,
        )
        .path_param("connectorExternalId", connector_external_id);
        self.finish(request, space)
    }

    fn delete_processor_request(&self, external_id: &str, space: u64) -> RequestDescriptor {
        let request = RequestDescriptor::delete(
            "PaymentWebAppsService.DeletePaymentWebAppsProcessorsExternalId",
            PROCESSOR_PATH,
        )
        .path_param("externalId", external_id);
        self.finish(request, space)
    }

    fn create_processor_request<B: Serialize + ?Sized>(
        &self,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<RequestDescriptor> {
        let request = RequestDescriptor::post(
            "PaymentWebAppsService.PostPaymentWebAppsProcessors",
            PROCESSORS_PATH,
        )
        .content_types(["application/json"]);
        self.finish(with_expand(request, expand), space).json_body(details)
    }

    fn activate_processor_request(
        &self,
        external_id: &str,
        space: u64,
        expand: &[&str],
    ) -> RequestDescriptor {
        let request = RequestDescriptor::post(
            "PaymentWebAppsService.PostPaymentWebAppsProcessorsExternalIdActivateForProduction",
            "/payment/web-apps/processors/{externalId}/activate-for-production",
        )
        .path_param("externalId", external_id);
        self.finish(with_expand(request, expand), space)
    }

    fn create_connector_request<B: Serialize + ?Sized>(
        &self,
        external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<RequestDescriptor> {
        let request = RequestDescriptor::post(
            "PaymentWebAppsService.PostPaymentWebAppsProcessorsExternalIdConnectors",
            "/payment/web-apps/processors/{externalId}/connectors",
        )
        .path_param("externalId", external_id)
        .content_types(["application/json"]);
        self.finish(with_expand(request, expand), space).json_body(details)
    }

    async fn execute_void(&self, request: RequestDescriptor) -> Result<ApiResponse<()>> {
        let response = self.client.execute::<IgnoredAny>(request).await?;
        Ok(response.map(|_| ()))
    }

    /// Delete a connector
    pub async fn delete_payment_web_apps_connectors_connector_external_id_with_http_info(
        &self,
        connector_external_id: &str,
        space: u64,
    ) -> Result<ApiResponse<()>> {
        self.execute_void(self.delete_connector_request(connector_external_id, space))
            .await
    }

    /// Delete a connector
    pub async fn delete_payment_web_apps_connectors_connector_external_id(
        &self,
        connector_external_id: &str,
        space: u64,
    ) -> Result<()> {
        self.delete_payment_web_apps_connectors_connector_external_id_with_http_info(
            connector_external_id,
            space,
        )
        .await
        .map(ApiResponse::into_data)
    }

    /// Delete a processor and its connectors
    pub async fn delete_payment_web_apps_processors_external_id_with_http_info(
        &self,
        external_id: &str,
        space: u64,
    ) -> Result<ApiResponse<()>> {
        self.execute_void(self.delete_processor_request(external_id, space))
            .await
    }

    /// Delete a processor and its connectors
    pub async fn delete_payment_web_apps_processors_external_id(
        &self,
        external_id: &str,
        space: u64,
    ) -> Result<()> {
        self.delete_payment_web_apps_processors_external_id_with_http_info(external_id, space)
            .await
            .map(ApiResponse::into_data)
    }

    /// Update a charge attempt
    pub async fn patch_payment_web_apps_charge_attempts_id_with_http_info<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.update_request(
            "PaymentWebAppsService.PatchPaymentWebAppsChargeAttemptsId",
            "/payment/web-apps/charge-attempts/{id}",
            ("id", &id.to_string()),
            space,
            update,
            expand,
        )?;
        self.client.execute(request).await
    }

    /// Update a charge attempt
    pub async fn patch_payment_web_apps_charge_attempts_id<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_payment_web_apps_charge_attempts_id_with_http_info(id, space, update, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Update a completion
    pub async fn patch_payment_web_apps_completions_id_with_http_info<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.update_request(
            "PaymentWebAppsService.PatchPaymentWebAppsCompletionsId",
            "/payment/web-apps/completions/{id}",
            ("id", &id.to_string()),
            space,
            update,
            expand,
        )?;
        self.client.execute(request).await
    }

    /// Update a completion
    pub async fn patch_payment_web_apps_completions_id<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_payment_web_apps_completions_id_with_http_info(id, space, update, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Update a connector
    pub async fn patch_payment_web_apps_connectors_connector_external_id_with_http_info<T, B>(
        &self,
        connector_external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.update_request(
            "PaymentWebAppsService.PatchPaymentWebAppsConnectorsConnectorExternalId",
            CONNECTOR_PATH,
            ("connectorExternalId", connector_external_id),
            space,
            details,
            expand,
        )?;
        self.client.execute(request).await
    }

    /// Update a connector
    pub async fn patch_payment_web_apps_connectors_connector_external_id<T, B>(
        &self,
        connector_external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_payment_web_apps_connectors_connector_external_id_with_http_info(
            connector_external_id,
            space,
            details,
            expand,
        )
        .await
        .map(ApiResponse::into_data)
    }

    /// Update a processor
    pub async fn patch_payment_web_apps_processors_external_id_with_http_info<T, B>(
        &self,
        external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.update_request(
            "PaymentWebAppsService.PatchPaymentWebAppsProcessorsExternalId",
            PROCESSOR_PATH,
            ("externalId", external_id),
            space,
            details,
            expand,
        )?;
        self.client.execute(request).await
    }

    /// Update a processor
    pub async fn patch_payment_web_apps_processors_external_id<T, B>(
        &self,
        external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_payment_web_apps_processors_external_id_with_http_info(
            external_id,
            space,
            details,
            expand,
        )
        .await
        .map(ApiResponse::into_data)
    }

    /// Update a refund
    pub async fn patch_payment_web_apps_refunds_id_with_http_info<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.update_request(
            "PaymentWebAppsService.PatchPaymentWebAppsRefundsId",
            "/payment/web-apps/refunds/{id}",
            ("id", &id.to_string()),
            space,
            update,
            expand,
        )?;
        self.client.execute(request).await
    }

    /// Update a refund
    pub async fn patch_payment_web_apps_refunds_id<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_payment_web_apps_refunds_id_with_http_info(id, space, update, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Update a void
    pub async fn patch_payment_web_apps_voids_id_with_http_info<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.update_request(
            "PaymentWebAppsService.PatchPaymentWebAppsVoidsId",
            "/payment/web-apps/voids/{id}",
            ("id", &id.to_string()),
            space,
            update,
            expand,
        )?;
        self.client.execute(request).await
    }

    /// Update a void
    pub async fn patch_payment_web_apps_voids_id<T, B>(
        &self,
        id: u64,
        space: u64,
        update: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_payment_web_apps_voids_id_with_http_info(id, space, update, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Create a processor
    pub async fn post_payment_web_apps_processors_with_http_info<T, B>(
        &self,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.create_processor_request(space, details, expand)?;
        self.client.execute(request).await
    }

    /// Create a processor
    pub async fn post_payment_web_apps_processors<T, B>(
        &self,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_payment_web_apps_processors_with_http_info(space, details, expand)
            .await
            .map(ApiResponse::into_data)
    }

    /// Activate a processor for production
    ///
    /// Irreversible: the processor stays in production until deleted.
    pub async fn post_payment_web_apps_processors_external_id_activate_for_production_with_http_info<
        T: DeserializeOwned,
    >(
        &self,
        external_id: &str,
        space: u64,
        expand: &[&str],
    ) -> Result<ApiResponse<T>> {
        let request = self.activate_processor_request(external_id, space, expand);
        self.client.execute(request).await
    }

    /// Activate a processor for production
    pub async fn post_payment_web_apps_processors_external_id_activate_for_production<
        T: DeserializeOwned,
    >(
        &self,
        external_id: &str,
        space: u64,
        expand: &[&str],
    ) -> Result<T> {
        self.post_payment_web_apps_processors_external_id_activate_for_production_with_http_info(
            external_id,
            space,
            expand,
        )
        .await
        .map(ApiResponse::into_data)
    }

    /// Create a connector for a processor
    pub async fn post_payment_web_apps_processors_external_id_connectors_with_http_info<T, B>(
        &self,
        external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.create_connector_request(external_id, space, details, expand)?;
        self.client.execute(request).await
    }

    /// Create a connector for a processor
    pub async fn post_payment_web_apps_processors_external_id_connectors<T, B>(
        &self,
        external_id: &str,
        space: u64,
        details: &B,
        expand: &[&str],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_payment_web_apps_processors_external_id_connectors_with_http_info(
            external_id,
            space,
            details,
            expand,
        )
        .await
        .map(ApiResponse::into_data)
    }
}
