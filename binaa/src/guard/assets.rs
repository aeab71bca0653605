use crate::i18n::Locale;

use super::config::{BYPASS_PREFIXES, PUBLIC_FILES, PUBLIC_FOLDERS};

/// The last path segment carries a file extension
fn has_extension(path: &str) -> bool {
    let segment = path.rsplit('/').next().unwrap_or_default();
    segment.find('.').is_some_and(|i| i + 1 < segment.len())
}

fn in_public_folder(path: &str) -> bool {
    PUBLIC_FOLDERS.iter().any(|folder| {
        path.strip_prefix(folder)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// `path` without a leading `/{locale}` segment, for each supported locale that prefixes it
fn unprefixed(path: &str) -> impl Iterator<Item = &str> {
    Locale::ALL.into_iter().filter_map(move |locale| {
        path.strip_prefix('/')
            .and_then(|p| p.strip_prefix(locale.code()))
            .filter(|rest| rest.starts_with('/'))
    })
}

/// Requests for static assets, framework internals and the API skip the guard entirely
pub fn is_public_asset_path(path: &str) -> bool {
    if BYPASS_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }

    let matches = |p: &str| PUBLIC_FILES.contains(&p) || has_extension(p) || in_public_folder(p);

    matches(path) || unprefixed(path).any(matches)
}
