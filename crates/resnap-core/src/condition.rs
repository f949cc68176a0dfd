//! Listing condition categories and their marketplace condition codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Condition category a user picks for a lookup.
///
/// Serialized with the human-facing labels (`"Open box"`, `"For parts or not
/// working"`) because that is what clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    New,
    #[serde(rename = "Open box")]
    OpenBox,
    Used,
    Broken,
    #[serde(rename = "For parts or not working")]
    ForParts,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::OpenBox,
        Condition::Used,
        Condition::Broken,
        Condition::ForParts,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::OpenBox => "Open box",
            Condition::Used => "Used",
            Condition::Broken => "Broken",
            Condition::ForParts => "For parts or not working",
        }
    }

    /// eBay `conditionIds` covered by this category.
    #[must_use]
    pub fn ebay_condition_ids(self) -> &'static [u32] {
        match self {
            Condition::New => &[1000],
            Condition::OpenBox => &[1500],
            Condition::Used => &[3000, 3010, 4000, 5000],
            Condition::Broken => &[6000],
            Condition::ForParts => &[7000],
        }
    }

    /// Resolves a label sent by a client. Only the exact display labels are
    /// recognized; anything else, including other casings, is [`Condition::Used`].
    #[must_use]
    pub fn from_label_lossy(label: &str) -> Self {
        Condition::ALL
            .iter()
            .copied()
            .find(|c| c.label() == label)
            .unwrap_or(Condition::Used)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    /// Exact labels match first; kebab/snake spellings (`open-box`,
    /// `for_parts`) are accepted case-insensitively for command-line use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(c) = Condition::ALL.iter().find(|c| c.label() == trimmed) {
            return Ok(*c);
        }
        let normalized = trimmed.to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "new" => Ok(Condition::New),
            "open box" | "openbox" => Ok(Condition::OpenBox),
            "used" => Ok(Condition::Used),
            "broken" => Ok(Condition::Broken),
            "for parts or not working" | "for parts" | "parts" => Ok(Condition::ForParts),
            _ => Err(CoreError::UnknownCondition(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ebay_codes_match_category_table() {
        assert_eq!(Condition::New.ebay_condition_ids(), &[1000]);
        assert_eq!(Condition::OpenBox.ebay_condition_ids(), &[1500]);
        assert_eq!(
            Condition::Used.ebay_condition_ids(),
            &[3000, 3010, 4000, 5000]
        );
        assert_eq!(Condition::Broken.ebay_condition_ids(), &[6000]);
        assert_eq!(Condition::ForParts.ebay_condition_ids(), &[7000]);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for condition in Condition::ALL {
            assert_eq!(condition.label().parse::<Condition>().unwrap(), condition);
        }
    }

    #[test]
    fn from_str_accepts_cli_spellings() {
        assert_eq!("open-box".parse::<Condition>().unwrap(), Condition::OpenBox);
        assert_eq!("USED".parse::<Condition>().unwrap(), Condition::Used);
        assert_eq!("for_parts".parse::<Condition>().unwrap(), Condition::ForParts);
    }

    #[test]
    fn from_str_rejects_unknown_label() {
        let err = "mint".parse::<Condition>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCondition(ref s) if s == "mint"));
    }

    #[test]
    fn unknown_label_falls_back_to_used() {
        assert_eq!(Condition::from_label_lossy("Like new"), Condition::Used);
        assert_eq!(
            Condition::from_label_lossy("Like new").ebay_condition_ids(),
            &[3000, 3010, 4000, 5000]
        );
    }

    #[test]
    fn lossy_parse_matches_exact_labels_only() {
        for condition in Condition::ALL {
            assert_eq!(Condition::from_label_lossy(condition.label()), condition);
        }
        for label in ["new", "open-box", "parts", "BROKEN", " New", "for_parts"] {
            assert_eq!(Condition::from_label_lossy(label), Condition::Used, "{label}");
        }
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&Condition::ForParts).unwrap();
        assert_eq!(json, "\"For parts or not working\"");
        let parsed: Condition = serde_json::from_str("\"Open box\"").unwrap();
        assert_eq!(parsed, Condition::OpenBox);
    }
}
