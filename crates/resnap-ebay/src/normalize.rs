//! Conversion from eBay item summaries to [`resnap_core::Listing`].

use resnap_core::{Listing, ListingPrice};

use crate::types::ItemSummary;

/// Normalizes a raw [`ItemSummary`] into a [`Listing`].
///
/// Missing titles become empty strings and a missing currency defaults to
/// USD; the price itself is passed through untouched so the estimator can
/// decide whether it is usable.
#[must_use]
pub fn normalize_item(item: ItemSummary) -> Listing {
    let price = item.price.map(|p| ListingPrice {
        value: p.value,
        currency: p.currency.unwrap_or_else(|| "USD".to_string()),
    });

    Listing {
        title: item.title.unwrap_or_default(),
        price,
        condition: item.condition,
        buying_options: item.buying_options,
        item_web_url: item.item_web_url,
        image: item.image.map(|i| i.image_url).filter(|u| !u.is_empty()),
    }
}
