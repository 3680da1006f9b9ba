//! Remote calls made by the view-models.

pub mod http;

use crate::model::two_factor::RemoteReply;

pub use http::AjaxRemote;

/// Server verification of a two-factor code.
///
/// Implementations report every failure through [`RemoteReply::status`];
/// they never panic or return early without a reply.
pub trait TwoFactorRemote: Send + Sync {
    fn test_two_factor(&self, code: &str) -> RemoteReply;
}
