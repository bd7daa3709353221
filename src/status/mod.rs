//! World status domain: population tiers plus the seams for fetching the
//! status page and extracting a tier from it.

pub mod extract;
pub mod fetch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Population tier of a world as shown on the Lodestone world status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Congested,
    Standard,
    Preferred,
    PreferredPlus,
    /// No tier could be determined from the page.
    Unknown,
}

impl Tier {
    /// Parse a tier keyword as it appears in the page text.
    /// Anything unrecognized maps to [`Tier::Unknown`], never an error.
    pub fn from_keyword(word: &str) -> Tier {
        match word.trim().to_ascii_lowercase().as_str() {
            "congested" => Tier::Congested,
            "standard" => Tier::Standard,
            "preferred" => Tier::Preferred,
            "preferred+" => Tier::PreferredPlus,
            _ => Tier::Unknown,
        }
    }

    /// Whether this tier permits new character creation.
    pub fn is_available(self) -> bool {
        matches!(self, Tier::Standard | Tier::Preferred | Tier::PreferredPlus)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Congested => "Congested",
            Tier::Standard => "Standard",
            Tier::Preferred => "Preferred",
            Tier::PreferredPlus => "Preferred+",
            Tier::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Source of the raw status page text.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_page(&self) -> Result<String, fetch::FetchError>;
}

/// Strategy for pulling one world's tier out of page text.
///
/// The Lodestone page has no documented stable structure, so extraction is
/// best-effort. Implementations return [`Tier::Unknown`] when nothing
/// matches; absence of a match is a valid result, not a failure.
pub trait TierExtractor: Send + Sync {
    fn extract(&self, page: &str, world: &str) -> Tier;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_keyword() {
        assert_eq!(Tier::from_keyword("Congested"), Tier::Congested);
        assert_eq!(Tier::from_keyword("standard"), Tier::Standard);
        assert_eq!(Tier::from_keyword("PREFERRED"), Tier::Preferred);
        assert_eq!(Tier::from_keyword("Preferred+"), Tier::PreferredPlus);
        assert_eq!(Tier::from_keyword("  Standard  "), Tier::Standard);
        assert_eq!(Tier::from_keyword("Full"), Tier::Unknown);
        assert_eq!(Tier::from_keyword(""), Tier::Unknown);
    }

    #[test]
    fn test_availability() {
        assert!(Tier::Standard.is_available());
        assert!(Tier::Preferred.is_available());
        assert!(Tier::PreferredPlus.is_available());
        assert!(!Tier::Congested.is_available());
        assert!(!Tier::Unknown.is_available());
    }

    #[test]
    fn test_display_matches_page_spelling() {
        assert_eq!(Tier::PreferredPlus.to_string(), "Preferred+");
        assert_eq!(Tier::Congested.to_string(), "Congested");
    }
}
