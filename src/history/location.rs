use url::form_urlencoded;

use crate::nav::LoadConfig;

/// Location tokens begin with `!/`: a service-relative path plus an
/// optional URL-encoded query string, dispatched to the configured load
/// target as a panel load.
pub const LOCATION_PREFIX: &str = "!/";

pub fn parse_location(token: &str) -> Option<LoadConfig> {
    if !token.starts_with(LOCATION_PREFIX) {
        return None;
    }
    // Strip only the leading `!`; the path keeps its slash.
    let rest = &token[1..];
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let params = query
        .map(|query| {
            form_urlencoded::parse(query.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();
    Some(LoadConfig {
        url: path.to_string(),
        params,
    })
}
