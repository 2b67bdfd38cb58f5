//! HTML helper functions

/// URL schemes that can execute script when followed
const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Opening tag with an optional class attribute
///
/// # Examples
/// ```ignore
/// open_tag("p", "")          // -> <p>
/// open_tag("h1", "title")    // -> <h1 class="title">
/// ```
pub fn open_tag(tag: &str, class: &str) -> String {
    if class.is_empty() {
        format!("<{}>", tag)
    } else {
        format!(r#"<{} class="{}">"#, tag, html_escape(class))
    }
}

/// Neutralize link targets that would run script
///
/// The result still needs attribute escaping.
pub fn safe_url(url: &str) -> &str {
    let normalized: String = url
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if UNSAFE_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        "#"
    } else {
        url.trim()
    }
}

/// Anchor tag with an escaped href
pub fn link_tag(url: &str, class: &str, inner_html: &str) -> String {
    let href = html_escape(safe_url(url));
    if class.is_empty() {
        format!(r#"<a href="{}">{}</a>"#, href, inner_html)
    } else {
        format!(
            r#"<a href="{}" class="{}">{}</a>"#,
            href,
            html_escape(class),
            inner_html
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_open_tag() {
        assert_eq!(open_tag("p", ""), "<p>");
        assert_eq!(open_tag("h1", "big bold"), r#"<h1 class="big bold">"#);
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://example.com"), "https://example.com");
        assert_eq!(safe_url("/cheatsheet/rust"), "/cheatsheet/rust");
        assert_eq!(safe_url("javascript:alert(1)"), "#");
        assert_eq!(safe_url("  JavaScript:alert(1)"), "#");
        assert_eq!(safe_url("java\tscript:alert(1)"), "#");
        assert_eq!(safe_url("data:text/html;base64,xx"), "#");
    }

    #[test]
    fn test_link_tag_escapes_href() {
        let html = link_tag(r#"https://x.com/"onmouseover="evil"#, "", "x");
        assert_eq!(
            html,
            r#"<a href="https://x.com/&quot;onmouseover=&quot;evil">x</a>"#
        );
    }
}
