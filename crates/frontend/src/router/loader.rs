//! Fragment fetch and content extraction.

use gloo_net::http::Request;
use web_sys::{DomParser, SupportedType};

use super::config::RouterConfig;
use super::error::RouterError;
use super::section_id::SectionId;
use super::store::FragmentRecord;

/// Deterministic fetch location for a section id. Review ids map into the
/// reviews subdirectory, everything else to a flat fragment file.
pub fn fragment_url(id: &SectionId, config: &RouterConfig) -> String {
    match id.review_slug() {
        Some(slug) => format!("{}/{}/{}.html", config.content_root, config.reviews_dir, slug),
        None => format!("{}/{}.html", config.content_root, id.as_str()),
    }
}

/// Fetch a section's fragment and extract its content element.
///
/// The response's resolved URL is recorded so relative links inside the
/// fragment can later be resolved against the place it was actually served
/// from.
pub async fn fetch_fragment(
    id: &SectionId,
    config: &RouterConfig,
) -> Result<FragmentRecord, RouterError> {
    let url = fragment_url(id, config);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|err| RouterError::RequestFailed(err.to_string()))?;

    if !response.ok() {
        return Err(RouterError::FetchFailed(response.status()));
    }

    let source_url = match response.url() {
        resolved if resolved.is_empty() => url,
        resolved => resolved,
    };
    let text = response
        .text()
        .await
        .map_err(|err| RouterError::RequestFailed(err.to_string()))?;

    // A degenerate document without any content-bearing element degrades to
    // the raw response text; content is better than nothing.
    let html = extract_content(&text, &config.extraction_selectors).unwrap_or_else(|| {
        log::debug!("section '{id}': no content element matched, using raw response text");
        text.clone()
    });

    Ok(FragmentRecord { html, source_url })
}

/// Parse a fetched document and return the inner markup of the first element
/// matching the configured selectors, in priority order.
fn extract_content(text: &str, selectors: &[String]) -> Option<String> {
    let parser = DomParser::new().ok()?;
    let document = parser.parse_from_string(text, SupportedType::TextHtml).ok()?;
    for selector in selectors {
        if let Ok(Some(element)) = document.query_selector(selector) {
            return Some(element.inner_html());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> SectionId {
        SectionId::normalize(Some(raw), &[])
    }

    #[test]
    fn plain_sections_map_to_flat_fragment_files() {
        let config = RouterConfig::default();
        assert_eq!(fragment_url(&id("Home"), &config), "html/Home.html");
        assert_eq!(fragment_url(&id("#Sobre"), &config), "html/sobre.html");
    }

    #[test]
    fn review_sections_map_into_the_reviews_subdirectory() {
        let config = RouterConfig::default();
        assert_eq!(
            fragment_url(&id("resenhas/foo.html"), &config),
            "html/resenhas/foo.html"
        );
        assert_eq!(
            fragment_url(&id("resenha-dom-casmurro"), &config),
            "html/resenhas/dom-casmurro.html"
        );
    }
}
