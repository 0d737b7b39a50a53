//! Resource services
//!
//! Each service groups the operations of one API resource. An operation is a
//! request-building function plus two entry points over it:
//! - `<operation>_with_http_info` returns the full [`ApiResponse`](crate::ApiResponse)
//! - `<operation>` returns only the payload
//!
//! Payload types are chosen by the caller: any `DeserializeOwned` type works,
//! `serde_json::Value` included. Operations without a response body return `()`.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use vr_payment::service::HumanUsersRolesService;
//! use vr_payment::{ApiClient, Configuration};
//!
//! # async fn example() -> vr_payment::Result<()> {
//! let config = Configuration::new(140366, "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=")?;
//! let client = Arc::new(ApiClient::new(config)?);
//!
//! let roles = HumanUsersRolesService::new(client.clone());
//! let assigned: serde_json::Value = roles
//!     .get_human_users_user_id_space_roles(1234, 82470)
//!     .await?;
//! println!("{}", assigned);
//! # Ok(())
//! # }
//! ```

use crate::types::RequestDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod express_checkout;
pub mod human_users_roles;
pub mod payment_web_apps;
pub mod subscription_charges;


pub use express_checkout::ExpressCheckoutService;
pub use human_users_roles::HumanUsersRolesService;
pub use payment_web_apps::PaymentWebAppsService;
pub use subscription_charges::{ChargeListOptions, ChargeSearchOptions, SubscriptionChargesService};

/// Sort direction for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortingOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

/// Add the `expand` parameter, one entry per expanded property
fn with_expand(request: RequestDescriptor, expand: &[&str]) -> RequestDescriptor {
    request.multi_query_param("expand", expand.iter().copied())
}
