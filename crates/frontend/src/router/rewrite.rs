//! Relative-link correction for injected fragments.
//!
//! Fragments are authored relative to their own file location; once injected
//! into the shell (possibly served from a different path depth) naive
//! relative paths would break. Every relative `img[src]`, `a[href]` and
//! inline `style` `url(...)` value is resolved against the fragment's own
//! source URL and, when it shares the shell's origin, re-expressed as a
//! root-relative path.

use wasm_bindgen::JsCast;
use web_sys::{Element, Url};

/// Rewrite the relative asset and link paths under a freshly injected
/// fragment root. Applied exactly once per injection.
pub fn fix_relative_links(root: &Element, source_url: &str) {
    let shell_origin = web_sys::window().and_then(|w| w.location().origin().ok());
    let resolve = |value: &str| resolve_value(value, source_url, shell_origin.as_deref());

    rewrite_attribute(root, "img[src]", "src", &resolve);
    rewrite_attribute(root, "a[href]", "href", &resolve);

    let Ok(styled) = root.query_selector_all("[style]") else {
        return;
    };
    for i in 0..styled.length() {
        let Some(node) = styled.get(i) else { continue };
        let Some(element) = node.dyn_ref::<Element>() else { continue };
        let Some(style) = element.get_attribute("style") else { continue };
        if let Some(rewritten) = rewrite_style_urls(&style, &resolve) {
            let _ = element.set_attribute("style", &rewritten);
        }
    }
}

fn rewrite_attribute(
    root: &Element,
    selector: &str,
    attribute: &str,
    resolve: &impl Fn(&str) -> Option<String>,
) {
    let Ok(matches) = root.query_selector_all(selector) else {
        return;
    };
    for i in 0..matches.length() {
        let Some(node) = matches.get(i) else { continue };
        let Some(element) = node.dyn_ref::<Element>() else { continue };
        let Some(value) = element.get_attribute(attribute) else { continue };
        if let Some(resolved) = resolve(&value) {
            let _ = element.set_attribute(attribute, &resolved);
        }
    }
}

/// Resolve one attribute value against the fragment's source URL. `None`
/// means the value is not a rewrite candidate and must be left untouched.
fn resolve_value(value: &str, source_url: &str, shell_origin: Option<&str>) -> Option<String> {
    if !needs_rewrite(value) {
        return None;
    }
    match Url::new_with_base(value, source_url) {
        Ok(resolved) => {
            let href = resolved.href();
            Some(match shell_origin {
                Some(origin) => relativize(&href, origin),
                None => href,
            })
        }
        // Unresolvable against the source URL; fall back to stripping the
        // upward-traversal prefix so the path is at least shell-relative.
        Err(_) => Some(strip_relative_prefix(value).to_string()),
    }
}

/// Only plain relative values are rewritten: hash-only, root-relative,
/// protocol-relative and scheme-qualified values already resolve correctly.
pub(crate) fn needs_rewrite(value: &str) -> bool {
    if value.is_empty() || value.starts_with('#') || value.starts_with('/') {
        return false;
    }
    if value.contains("://") {
        return false;
    }
    !["data:", "mailto:", "tel:", "javascript:"].iter().any(|scheme| {
        value.len() >= scheme.len()
            && value.as_bytes()[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
    })
}

/// Strip any leading sequence of `./` and `../` segments.
pub(crate) fn strip_relative_prefix(value: &str) -> &str {
    let mut rest = value;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else {
            return rest;
        }
    }
}

/// Re-express an absolute URL as a root-relative path when it lives on the
/// shell's own origin.
pub(crate) fn relativize(href: &str, origin: &str) -> String {
    match href.strip_prefix(origin) {
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => href.to_string(),
    }
}

/// Rewrite every `url(...)` reference inside an inline style attribute.
/// Returns `None` when nothing changed.
pub(crate) fn rewrite_style_urls(
    style: &str,
    resolve: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let mut out = String::with_capacity(style.len());
    let mut rest = style;
    let mut changed = false;

    while let Some(start) = rest.find("url(") {
        let (head, tail) = rest.split_at(start + 4);
        out.push_str(head);
        let Some(end) = tail.find(')') else {
            // Unterminated reference; emit the remainder untouched.
            rest = tail;
            break;
        };
        let inner = &tail[..end];
        let reference = inner.trim().trim_matches(|c| c == '"' || c == '\'');
        match resolve(reference) {
            Some(resolved) => {
                out.push_str(&resolved);
                changed = true;
            }
            None => out.push_str(inner),
        }
        out.push(')');
        rest = &tail[end + 1..];
    }

    out.push_str(rest);
    changed.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_relative_values_are_candidates() {
        assert!(needs_rewrite("img/x.png"));
        assert!(needs_rewrite("../../img/x.png"));
        assert!(needs_rewrite("./style.css"));

        assert!(!needs_rewrite(""));
        assert!(!needs_rewrite("#Sobre"));
        assert!(!needs_rewrite("/img/x.png"));
        assert!(!needs_rewrite("//cdn.example.com/x.png"));
        assert!(!needs_rewrite("https://example.com/x.png"));
        assert!(!needs_rewrite("data:image/png;base64,AAAA"));
        assert!(!needs_rewrite("mailto:someone@example.com"));
    }

    #[test]
    fn traversal_prefixes_are_fully_stripped() {
        assert_eq!(strip_relative_prefix("../../img/x.png"), "img/x.png");
        assert_eq!(strip_relative_prefix("./img/x.png"), "img/x.png");
        assert_eq!(strip_relative_prefix(".././../img/x.png"), "img/x.png");
        assert_eq!(strip_relative_prefix("img/x.png"), "img/x.png");
    }

    #[test]
    fn stripped_values_never_keep_a_traversal_prefix() {
        for value in ["../../img/x.png", "./a/../b.png", "../x"] {
            let stripped = strip_relative_prefix(value);
            assert!(!stripped.starts_with("./"), "value: {value}");
            assert!(!stripped.starts_with("../"), "value: {value}");
        }
    }

    #[test]
    fn same_origin_urls_become_root_relative() {
        assert_eq!(
            relativize("https://example.com/repo/img/x.png", "https://example.com"),
            "/repo/img/x.png"
        );
        assert_eq!(
            relativize("https://other.com/img/x.png", "https://example.com"),
            "https://other.com/img/x.png"
        );
    }

    #[test]
    fn inline_style_url_references_are_rewritten() {
        let resolve = |value: &str| {
            needs_rewrite(value).then(|| format!("/assets/{}", strip_relative_prefix(value)))
        };
        let style = "background: url('../../img/bg.png') no-repeat; color: red";
        assert_eq!(
            rewrite_style_urls(style, &resolve).as_deref(),
            Some("background: url(/assets/img/bg.png) no-repeat; color: red")
        );
    }

    #[test]
    fn untouched_styles_report_no_change() {
        let resolve = |value: &str| {
            needs_rewrite(value).then(|| format!("/assets/{}", strip_relative_prefix(value)))
        };
        assert_eq!(rewrite_style_urls("color: red", &resolve), None);
        assert_eq!(
            rewrite_style_urls("background: url(/img/bg.png)", &resolve),
            None
        );
    }
}
