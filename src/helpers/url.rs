//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/api/cheatsheets") // -> "/docs/api/cheatsheets"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// URL of a single cheatsheet page
pub fn cheatsheet_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("cheatsheet/{}/", encode_segment(slug)))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            root: "/docs/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/api/categories"), "/docs/api/categories");
        assert_eq!(url_for(&config, ""), "/docs/");
        assert_eq!(url_for(&SiteConfig::default(), "index.json"), "/index.json");
    }

    #[test]
    fn test_cheatsheet_url() {
        let config = test_config();
        assert_eq!(cheatsheet_url(&config, "rust"), "/docs/cheatsheet/rust/");
        assert_eq!(cheatsheet_url(&config, "c++"), "/docs/cheatsheet/c%2B%2B/");
        assert_eq!(
            cheatsheet_url(&config, "node_js-v2.0"),
            "/docs/cheatsheet/node_js-v2.0/"
        );
    }
}
