//! Central configuration for the binaa crate

use std::sync::LazyLock;

use crate::i18n::Locale;

/// Deployment environment. Cookies carry the `Secure` attribute only when this is "production".
/// Default: "development"
pub static APP_ENV: LazyLock<String> =
    LazyLock::new(|| std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()));

pub static IS_PRODUCTION: LazyLock<bool> = LazyLock::new(|| is_production_env(APP_ENV.as_str()));

/// Locale used when negotiation finds no match
/// Default: "ar"
pub static DEFAULT_LOCALE: LazyLock<Locale> = LazyLock::new(|| {
    parse_default_locale(std::env::var("DEFAULT_LOCALE").ok().as_deref())
});

fn is_production_env(value: &str) -> bool {
    value.eq_ignore_ascii_case("production")
}

fn parse_default_locale(value: Option<&str>) -> Locale {
    match value.and_then(Locale::from_code) {
        Some(locale) => locale,
        None => {
            if let Some(v) = value {
                tracing::warn!("Unsupported DEFAULT_LOCALE '{}', falling back to 'ar'", v);
            }
            Locale::Ar
        }
    }
}
