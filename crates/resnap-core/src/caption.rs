//! Packed caption strings: `"<label> (<condition>) - <estimate>"`.
//!
//! History entries are structured internally; the packed form exists for
//! display compatibility and is split back apart on the literal `" - "`.

use crate::estimate::{PriceEstimate, CURRENCY_SYMBOL, NO_PRICES_FOUND};

pub const SEPARATOR: &str = " - ";
pub const PENDING_CAPTION: &str = "⏳ Searching...";
pub const ERROR_CAPTION: &str = "❌ Error fetching price";

/// Title and price halves of a packed caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionParts<'a> {
    pub title: &'a str,
    pub price: &'a str,
}

/// Packs a lookup result into its display caption.
#[must_use]
pub fn format_caption(label: &str, condition: &str, estimate: &PriceEstimate) -> String {
    format!("{label} ({condition}){SEPARATOR}{estimate}")
}

/// Splits a caption into title and price.
///
/// - no separator: the whole caption is the title (status markers land here);
/// - one separator: split there;
/// - several: split at the last one when what follows it is estimate text,
///   since labels may contain `" - "` but estimates never do; otherwise
///   split at the second-to-last.
#[must_use]
pub fn parse_caption(caption: &str) -> CaptionParts<'_> {
    let positions: Vec<usize> = caption.match_indices(SEPARATOR).map(|(i, _)| i).collect();

    let split_at = match positions.as_slice() {
        [] => {
            return CaptionParts {
                title: caption,
                price: "",
            }
        }
        [only] => *only,
        [.., second_last, last] => {
            if is_estimate_text(&caption[last + SEPARATOR.len()..]) {
                *last
            } else {
                *second_last
            }
        }
    };

    CaptionParts {
        title: &caption[..split_at],
        price: &caption[split_at + SEPARATOR.len()..],
    }
}

/// Lower bound of the price encoded in a caption, if any.
#[must_use]
pub fn lower_bound_from_caption(caption: &str) -> Option<f64> {
    let parts = parse_caption(caption);
    let price = if parts.price.is_empty() {
        parts.title
    } else {
        parts.price
    };
    crate::estimate::lower_bound_from_text(price.trim())
}

fn is_estimate_text(text: &str) -> bool {
    let text = text.trim();
    text == NO_PRICES_FOUND || text.starts_with(CURRENCY_SYMBOL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_packs_label_condition_and_estimate() {
        let caption = format_caption("Widget", "Used", &PriceEstimate::Range { min: 5.0, max: 9.0 });
        assert_eq!(caption, "Widget (Used) - $5-9");
    }

    #[test]
    fn format_with_no_prices_sentinel() {
        let caption = format_caption("Mystery box", "New", &PriceEstimate::NoPrices);
        assert_eq!(caption, "Mystery box (New) - No prices found");
    }

    #[test]
    fn parse_inverts_format() {
        let parts = parse_caption("Widget (Used) - $5-9");
        assert_eq!(parts.title, "Widget (Used)");
        assert_eq!(parts.price, "$5-9");
    }

    #[test]
    fn parse_keeps_separator_inside_label() {
        let parts = parse_caption("A - B (Used) - $5-9");
        assert_eq!(parts.title, "A - B (Used)");
        assert_eq!(parts.price, "$5-9");
    }

    #[test]
    fn parse_round_trips_labels_with_several_separators() {
        let estimate = PriceEstimate::Range {
            min: 20.0,
            max: 35.0,
        };
        let caption = format_caption("Xbox - One - Controller", "Open box", &estimate);
        let parts = parse_caption(&caption);
        assert_eq!(parts.title, "Xbox - One - Controller (Open box)");
        assert_eq!(parts.price, "$20-35");
    }

    #[test]
    fn parse_without_separator_is_all_title() {
        let parts = parse_caption(PENDING_CAPTION);
        assert_eq!(parts.title, PENDING_CAPTION);
        assert_eq!(parts.price, "");
    }

    #[test]
    fn parse_falls_back_to_second_to_last_for_unformatted_text() {
        let parts = parse_caption("A - B - C");
        assert_eq!(parts.title, "A");
        assert_eq!(parts.price, "B - C");
    }

    #[test]
    fn lower_bound_from_caption_reads_price_half() {
        assert_eq!(lower_bound_from_caption("Widget (Used) - $5-9"), Some(5.0));
        assert_eq!(lower_bound_from_caption("PS4 - 500GB (Used) - $120"), Some(120.0));
        assert_eq!(
            lower_bound_from_caption("Lamp (New) - No prices found"),
            None
        );
        assert_eq!(lower_bound_from_caption(ERROR_CAPTION), None);
    }
}
