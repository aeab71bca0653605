use serde::{Deserialize, Serialize};
use std::fmt;

/// Locales the site is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    /// Exact two-letter code lookup, as used in URL prefixes
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn dir(&self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            Locale::En => "ltr",
        }
    }

    /// Picks the best supported locale for an `Accept-Language` header value.
    ///
    /// Ranges are ordered by their `q` weight (stable for equal weights). Each range is
    /// tried as an exact code, then by its primary subtag (`ar-SA` matches `ar`).
    /// A `*` range or no match at all yields `default`.
    pub fn negotiate(accept_language: Option<&str>, default: Locale) -> Locale {
        let Some(header) = accept_language else {
            return default;
        };

        let mut ranges: Vec<(String, f32)> = header
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.trim().split(';');
                let tag = pieces.next()?.trim().to_ascii_lowercase();
                if tag.is_empty() {
                    return None;
                }
                let q = pieces
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|v| v.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (q > 0.0).then_some((tag, q))
            })
            .collect();

        ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        for (tag, _) in &ranges {
            if tag == "*" {
                return default;
            }
            if let Some(locale) = Self::from_code(tag) {
                return locale;
            }
            let primary = tag.split('-').next().unwrap_or_default();
            if let Some(locale) = Self::from_code(primary) {
                return locale;
            }
        }

        default
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("ar"), Some(Locale::Ar));
        assert_eq!(Locale::from_code("en"), Some(Locale::En));
        assert_eq!(Locale::from_code("EN"), None);
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_dir() {
        assert_eq!(Locale::Ar.dir(), "rtl");
        assert_eq!(Locale::En.dir(), "ltr");
    }

    #[test]
    fn test_negotiate_missing_header_uses_default() {
        assert_eq!(Locale::negotiate(None, Locale::Ar), Locale::Ar);
        assert_eq!(Locale::negotiate(Some(""), Locale::En), Locale::En);
    }

    #[test]
    fn test_negotiate_exact_and_primary_subtag() {
        assert_eq!(Locale::negotiate(Some("en"), Locale::Ar), Locale::En);
        assert_eq!(Locale::negotiate(Some("en-US,en;q=0.9"), Locale::Ar), Locale::En);
        assert_eq!(Locale::negotiate(Some("ar-SA"), Locale::En), Locale::Ar);
    }

    #[test]
    fn test_negotiate_respects_quality() {
        // English has a higher weight than Arabic despite appearing later
        let header = "ar;q=0.5, en;q=0.8";
        assert_eq!(Locale::negotiate(Some(header), Locale::Ar), Locale::En);
    }

    #[test]
    fn test_negotiate_skips_unsupported() {
        let header = "fr-FR, de;q=0.9, en;q=0.1";
        assert_eq!(Locale::negotiate(Some(header), Locale::Ar), Locale::En);

        let header = "fr-FR, de;q=0.9";
        assert_eq!(Locale::negotiate(Some(header), Locale::Ar), Locale::Ar);
    }

    #[test]
    fn test_negotiate_zero_quality_is_excluded() {
        assert_eq!(Locale::negotiate(Some("en;q=0"), Locale::Ar), Locale::Ar);
    }

    #[test]
    fn test_negotiate_wildcard_uses_default() {
        assert_eq!(Locale::negotiate(Some("*"), Locale::En), Locale::En);
    }

    proptest! {
        #[test]
        fn negotiate_always_returns_supported_locale(header in ".{0,64}") {
            let locale = Locale::negotiate(Some(&header), Locale::Ar);
            prop_assert!(Locale::ALL.contains(&locale));
        }
    }
}
