//! Signed request URL construction.
//!
//! Both endpoints carry the same four query parameters:
//! `Cols`, `AccessID`, `Expires` and `Signature`. The signature is already
//! percent-encoded by the signer, so the query string is assembled by hand
//! rather than through a form serializer that would escape it twice.

use crate::metrics::ColumnMask;
use crate::signer::SignedAuth;

/// Query string shared by the single and batch requests.
pub(crate) fn auth_query(columns: ColumnMask, access_id: &str, auth: &SignedAuth) -> String {
    format!(
        "Cols={}&AccessID={}&Expires={}&Signature={}",
        columns.bits(),
        urlencoding::encode(access_id),
        auth.expires,
        auth.signature
    )
}

/// `GET {endpoint}/{percent-encoded target}?{auth query}`
pub(crate) fn single_url(
    endpoint: &str,
    target_url: &str,
    columns: ColumnMask,
    access_id: &str,
    auth: &SignedAuth,
) -> String {
    format!(
        "{}/{}?{}",
        endpoint,
        urlencoding::encode(target_url),
        auth_query(columns, access_id, auth)
    )
}

/// `POST {endpoint}/?{auth query}`
pub(crate) fn batch_url(
    endpoint: &str,
    columns: ColumnMask,
    access_id: &str,
    auth: &SignedAuth,
) -> String {
    format!("{}/?{}", endpoint, auth_query(columns, access_id, auth))
}
