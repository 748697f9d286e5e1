//! `since_id` pagination for the Admin `products.json` listing.
//!
//! Each request asks for products with an id strictly greater than
//! `since_id`, in ascending id order. The next cursor is the id of the last
//! product on the page; an empty page ends the listing.

use crate::error::ShopifyError;
use crate::types::AdminProduct;

/// Computes the cursor for the page after `page`.
///
/// Returns `Ok(None)` when `page` is empty (listing complete).
///
/// # Errors
///
/// Returns [`ShopifyError::PaginationStalled`] if the last id on the page does
/// not advance past `since_id`, which would otherwise loop forever.
pub fn next_since_id(since_id: i64, page: &[AdminProduct]) -> Result<Option<i64>, ShopifyError> {
    let Some(last) = page.last() else {
        return Ok(None);
    };
    if last.id <= since_id {
        return Err(ShopifyError::PaginationStalled { since_id });
    }
    Ok(Some(last.id))
}
