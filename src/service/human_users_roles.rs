//! Role assignments of human users

use crate::types::{ApiResponse, RequestDescriptor};
use crate::{ApiClient, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;

const ACCOUNT_ROLES_PATH: &str = "/human-users/{userId}/account-roles";
const SPACE_ROLES_PATH: &str = "/human-users/{userId}/space-roles";

/// Operations on `/human-users/{userId}/account-roles` and `/space-roles`
#[derive(Debug, Clone)]
pub struct HumanUsersRolesService {
    client: Arc<ApiClient>,
    operation_index: u32,
}

impl HumanUsersRolesService {
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

    fn roles_request(&self, request: RequestDescriptor, user_id: u64) -> RequestDescriptor {
        request
            .path_param("userId", user_id)
            .with_operation_index(self.operation_index)
    }

    fn delete_account_role_request(&self, user_id: u64, role_id: u64, account: u64) -> RequestDescriptor {
        self.roles_request(
            RequestDescriptor::delete(
                "HumanUsersRolesService.DeleteHumanUsersUserIdAccountRoles",
                ACCOUNT_ROLES_PATH,
            ),
            user_id,
        )
        .query_param("roleId", role_id)
        .account(account)
    }

    fn delete_space_role_request(&self, user_id: u64, role_id: u64, space: u64) -> RequestDescriptor {
        self.roles_request(
            RequestDescriptor::delete(
                "HumanUsersRolesService.DeleteHumanUsersUserIdSpaceRoles",
                SPACE_ROLES_PATH,
            ),
            user_id,
        )
        .query_param("roleId", role_id)
        .space(space)
    }

    fn list_account_roles_request(&self, user_id: u64, account: u64) -> RequestDescriptor {
        self.roles_request(
            RequestDescriptor::get(
                "HumanUsersRolesService.GetHumanUsersUserIdAccountRoles",
                ACCOUNT_ROLES_PATH,
            ),
            user_id,
        )
        .account(account)
    }

    fn list_space_roles_request(&self, user_id: u64, space: u64) -> RequestDescriptor {
        self.roles_request(
            RequestDescriptor::get(
                "HumanUsersRolesService.GetHumanUsersUserIdSpaceRoles",
                SPACE_ROLES_PATH,
            ),
            user_id,
        )
        .space(space)
    }

    fn assign_account_role_request(
        &self,
        user_id: u64,
        role_id: u64,
        account: u64,
        applies_on_sub_account: Option<bool>,
    ) -> RequestDescriptor {
        self.roles_request(
            RequestDescriptor::post(
                "HumanUsersRolesService.PostHumanUsersUserIdAccountRoles",
                ACCOUNT_ROLES_PATH,
            ),
            user_id,
        )
        .query_param("roleId", role_id)
        .optional_query_param("appliesOnSubAccount", applies_on_sub_account)
        .account(account)
    }

    fn assign_space_role_request(&self, user_id: u64, role_id: u64, space: u64) -> RequestDescriptor {
        self.roles_request(
            RequestDescriptor::post(
                "HumanUsersRolesService.PostHumanUsersUserIdSpaceRoles",
                SPACE_ROLES_PATH,
            ),
            user_id,
        )
        .query_param("roleId", role_id)
        .space(space)
    }

    async fn execute_void(&self, request: RequestDescriptor) -> Result<ApiResponse<()>> {
        let response = self.client.execute::<IgnoredAny>(request).await?;
        Ok(response.map(|_| ()))
    }

    /// Unassign a role from a human user for an account
    pub async fn delete_human_users_user_id_account_roles_with_http_info(
        &self,
        user_id: u64,
        role_id: u64,
        account: u64,
    ) -> Result<ApiResponse<()>> {
        self.execute_void(self.delete_account_role_request(user_id, role_id, account)).await
    }

    /// Unassign a role from a human user for an account
    pub async fn delete_human_users_user_id_account_roles(
        &self,
        user_id: u64,
        role_id: u64,
        account: u64,
    ) -> Result<()> {
        self.delete_human_users_user_id_account_roles_with_http_info(user_id, role_id, account)
            .await
            .map(ApiResponse::into_data)
    }

    /// Unassign a role from a human user for a space
    pub async fn delete_human_users_user_id_space_roles_with_http_info(
        &self,
        user_id: u64,
        role_id: u64,
        space: u64,
    ) -> Result<ApiResponse<()>> {
        self.execute_void(self.delete_space_role_request(user_id, role_id, space)).await
    }

    /// Unassign a role from a human user for a space
    pub async fn delete_human_users_user_id_space_roles(
        &self,
        user_id: u64,
        role_id: u64,
        space: u64,
    ) -> Result<()> {
        self.delete_human_users_user_id_space_roles_with_http_info(user_id, role_id, space)
            .await
            .map(ApiResponse::into_data)
    }

    /// List all roles of a human user for an account
    pub async fn get_human_users_user_id_account_roles_with_http_info<T: DeserializeOwned>(
        &self,
        user_id: u64,
        account: u64,
    ) -> Result<ApiResponse<T>> {
        self.client
            .execute(self.list_account_roles_request(user_id, account))
            .await
    }

    /// List all roles of a human user for an account
    pub async fn get_human_users_user_id_account_roles<T: DeserializeOwned>(
        &self,
        user_id: u64,
        account: u64,
    ) -> Result<T> {
        self.get_human_users_user_id_account_roles_with_http_info(user_id, account)
            .await
            .map(ApiResponse::into_data)
    }

    /// List all roles of a human user for a space
    pub async fn get_human_users_user_id_space_roles_with_http_info<T: DeserializeOwned>(
        &self,
        user_id: u64,
        space: u64,
    ) -> Result<ApiResponse<T>> {
        self.client
            .execute(self.list_space_roles_request(user_id, space))
            .await
    }

    /// List all roles of a human user for a space
    pub async fn get_human_users_user_id_space_roles<T: DeserializeOwned>(
        &self,
        user_id: u64,
        space: u64,
    ) -> Result<T> {
        self.get_human_users_user_id_space_roles_with_http_info(user_id, space)
            .await
            .map(ApiResponse::into_data)
    }

    /// Assign a role to a human user for an account
    ///
    /// `applies_on_sub_account` restricts the assignment to sub-accounts.
    pub async fn post_human_users_user_id_account_roles_with_http_info<T: DeserializeOwned>(
        &self,
        user_id: u64,
        role_id: u64,
        account: u64,
        applies_on_sub_account: Option<bool>,
    ) -> Result<ApiResponse<T>> {
        let request =
            self.assign_account_role_request(user_id, role_id, account, applies_on_sub_account);
        self.client.execute(request).await
    }

    /// Assign a role to a human user for an account
    pub async fn post_human_users_user_id_account_roles<T: DeserializeOwned>(
        &self,
        user_id: u64,
        role_id: u64,
        account: u64,
        applies_on_sub_account: Option<bool>,
    ) -> Result<T> {
        self.post_human_users_user_id_account_roles_with_http_info(
            user_id,
            role_id,
            account,
            applies_on_sub_account,
        )
        .await
        .map(ApiResponse::into_data)
    }

    /// Assign a role to a human user for a space
    pub async fn post_human_users_user_id_space_roles_with_http_info<T: DeserializeOwned>(
        &self,
        user_id: u64,
        role_id: u64,
        space: u64,
    ) -> Result<ApiResponse<T>> {
        self.client
            .execute(self.assign_space_role_request(user_id, role_id, space))
            .await
    }

    /// Assign a role to a human user for a space
    pub async fn post_human_users_user_id_space_roles<T: DeserializeOwned>(
        &self,
        user_id: u64,
        role_id: u64,
        space: u64,
    ) -> Result<T> {
        self.post_human_users_user_id_space_roles_with_http_info(user_id, role_id, space)
            .await
            .map(ApiResponse::into_data)
    }
}
