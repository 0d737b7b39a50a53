//! Request and response types shared by every operation
//!
//! # Architecture
//!
//! - [`request`] - [`RequestDescriptor`], the declarative description of one
//!   call, and [`PreparedRequest`], the same call after path resolution,
//!   content negotiation and signing
//! - [`response`] - [`RawResponse`] as handed to the error classifier and
//!   [`ApiResponse`], the typed envelope returned to callers
//!
//! # Examples
//!
//! ```
//! use vr_payment::types::{CollectionFormat, RequestDescriptor};
//!
//! let request = RequestDescriptor::get(
//!     "SubscriptionChargesService.GetSubscriptionsCharges",
//!     "/subscriptions/charges",
//! )
//! .space(82470)
//! .multi_query_param("expand", ["subscription", "ledgerEntries"])
//! .collection_query_param("ids", [1, 2, 3], CollectionFormat::Csv)
//! .optional_query_param("limit", Some(20))
//! .optional_query_param("after", None::<u64>);
//!
//! assert_eq!(
//!     request.query_pairs(),
//!     vec![
//!         ("expand".to_string(), "subscription".to_string()),
//!         ("expand".to_string(), "ledgerEntries".to_string()),
//!         ("ids".to_string(), "1,2,3".to_string()),
//!         ("limit".to_string(), "20".to_string()),
//!     ]
//! );
//! assert_eq!(request.content_type(), None);
//! ```

pub mod request;
pub mod response;


pub use request::{
    is_json_mime, select_header_accept, select_header_content_type, CollectionFormat,
    PreparedRequest, QueryParameter, RequestDescriptor, APPLICATION_JSON,
};
pub use response::{ApiResponse, RawResponse};
