//! Price-range estimation from noisy marketplace listing prices.
//!
//! Listing prices are filtered to positive finite values, trimmed of
//! outliers with an index-based interquartile-range rule when there are at
//! least four of them, and reduced to a `[min, max]` range.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum number of prices before outlier rejection kicks in.
const IQR_MIN_SAMPLES: usize = 4;
const IQR_FENCE: f64 = 1.5;

pub const CURRENCY_SYMBOL: &str = "$";
pub const NO_PRICES_FOUND: &str = "No prices found";

static LEADING_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?([\d,]+(?:\.\d+)?)").expect("valid regex"));

/// Estimated resale value derived from comparable listings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "EstimateRepr", from = "EstimateRepr")]
pub enum PriceEstimate {
    /// Closed interval; `min == max` when a single price survived.
    Range { min: f64, max: f64 },
    /// No usable prices.
    NoPrices,
}

impl PriceEstimate {
    /// Lower end of the range; `None` for [`PriceEstimate::NoPrices`].
    #[must_use]
    pub fn lower_bound(&self) -> Option<f64> {
        match self {
            PriceEstimate::Range { min, .. } => Some(*min),
            PriceEstimate::NoPrices => None,
        }
    }
}

impl fmt::Display for PriceEstimate {
    /// `$20`, `$54.99-174.99`, or `No prices found`. Amounts use the shortest
    /// float rendering, so whole numbers carry no decimals.
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceEstimate::Range { min, max } if min == max => {
                write!(f, "{CURRENCY_SYMBOL}{min}")
            }
            PriceEstimate::Range { min, max } => write!(f, "{CURRENCY_SYMBOL}{min}-{max}"),
            PriceEstimate::NoPrices => f.write_str(NO_PRICES_FOUND),
        }
    }
}

/// Wire shape: `{"kind":"range","min":5.0,"max":9.0,"display":"$5-9"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EstimateRepr {
    kind: EstimateKind,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    display: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EstimateKind {
    Range,
    NoPrices,
}

impl From<PriceEstimate> for EstimateRepr {
    fn from(estimate: PriceEstimate) -> Self {
        let display = estimate.to_string();
        match estimate {
            PriceEstimate::Range { min, max } => Self {
                kind: EstimateKind::Range,
                min: Some(min),
                max: Some(max),
                display,
            },
            PriceEstimate::NoPrices => Self {
                kind: EstimateKind::NoPrices,
                min: None,
                max: None,
                display,
            },
        }
    }
}

impl From<EstimateRepr> for PriceEstimate {
    fn from(repr: EstimateRepr) -> Self {
        match (repr.kind, repr.min, repr.max) {
            (EstimateKind::Range, Some(min), Some(max)) => PriceEstimate::Range { min, max },
            (EstimateKind::Range, Some(v), None) | (EstimateKind::Range, None, Some(v)) => {
                PriceEstimate::Range { min: v, max: v }
            }
            _ => PriceEstimate::NoPrices,
        }
    }
}

/// Estimates a resale price range from raw listing prices.
///
/// Non-positive and non-finite values are discarded. With four or more
/// survivors, values outside `[q1 - 1.5·iqr, q3 + 1.5·iqr]` are rejected,
/// where `q1 = sorted[n / 4]` and `q3 = sorted[ceil(3n / 4) - 1]`. These
/// index formulas are not interpolated quartiles and must stay as-is:
/// displayed ranges depend on them.
pub fn estimate_prices<I>(prices: I) -> PriceEstimate
where
    I: IntoIterator<Item = f64>,
{
    let mut valid: Vec<f64> = prices
        .into_iter()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    if valid.len() >= IQR_MIN_SAMPLES {
        valid.sort_by(f64::total_cmp);
        let n = valid.len();
        let q1 = valid[n / 4];
        let q3 = valid[(3 * n).div_ceil(4) - 1];
        let iqr = q3 - q1;
        let lower = q1 - IQR_FENCE * iqr;
        let upper = q3 + IQR_FENCE * iqr;
        valid.retain(|p| *p >= lower && *p <= upper);
    }

    let mut iter = valid.into_iter();
    let Some(first) = iter.next() else {
        return PriceEstimate::NoPrices;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    PriceEstimate::Range { min, max }
}

/// Extracts the lower bound from displayed price text such as `"$12-20"`,
/// `"$12"`, or `"$1,250.50-1,400"`.
///
/// Returns `None` for the no-prices sentinel, status markers, and anything
/// mentioning an unknown or unfound price.
#[must_use]
pub fn lower_bound_from_text(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase();
    if lowered.contains("unknown") || lowered.contains("could not find") {
        return None;
    }
    let caps = LEADING_AMOUNT_RE.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse::<f64>().ok()
}

/// Conservative total of saved price texts: the sum of each lower bound.
///
/// Texts without a lower bound contribute nothing.
pub fn minimum_total<I, S>(texts: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .filter_map(|t| lower_bound_from_text(t.as_ref()))
        .sum()
}

/// Structured counterpart of [`minimum_total`].
pub fn minimum_total_of<'a, I>(estimates: I) -> f64
where
    I: IntoIterator<Item = &'a PriceEstimate>,
{
    estimates
        .into_iter()
        .filter_map(PriceEstimate::lower_bound)
        .sum()
}
