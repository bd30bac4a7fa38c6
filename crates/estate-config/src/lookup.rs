use std::str::FromStr;

pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn string_or(lookup: Lookup, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_or<T: FromStr>(lookup: Lookup, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Comma separated list, blanks dropped
pub(crate) fn list(lookup: Lookup, key: &str) -> Vec<String> {
    lookup(key)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
