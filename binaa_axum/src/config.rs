//! Central configuration for the binaa_axum crate

use std::sync::LazyLock;

/// Directory served for requests no route matches
/// Default: "public"
pub static PUBLIC_DIR: LazyLock<String> =
    LazyLock::new(|| public_dir(std::env::var("PUBLIC_DIR").ok().as_deref()));

/// Number of projects shown on the home page
pub(crate) const HOME_PROJECT_COUNT: i64 = 6;

fn public_dir(env_value: Option<&str>) -> String {
    env_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("public")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_dir_default() {
        assert_eq!(public_dir(None), "public");
        assert_eq!(public_dir(Some("  ")), "public");
    }

    #[test]
    fn test_public_dir_custom() {
        assert_eq!(public_dir(Some("/srv/binaa/public")), "/srv/binaa/public");
    }
}
