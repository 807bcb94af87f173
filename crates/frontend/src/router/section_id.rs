//! Canonical section identifiers.
//!
//! Every navigation target (a location hash, a menu anchor `href`, a bare
//! review filename) is reduced to a single canonical [`SectionId`] that is
//! used everywhere: as cache key, as DOM container id, and as history hash.

use std::fmt;

/// Section the router falls back to when the hash is empty or absent.
pub const DEFAULT_SECTION: &str = "Home";

/// Directory (single path segment) that review fragments live under.
pub const REVIEWS_DIR: &str = "resenhas";

/// Prefix of the synthetic ids given to review sections.
pub const REVIEW_PREFIX: &str = "resenha-";

/// Canonical identifier of a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    /// Normalize a raw navigation token into a canonical id.
    ///
    /// `existing_ids` are the ids of the section containers currently in the
    /// DOM; a case-insensitive match among them wins, so links may use any
    /// casing while the authored id stays canonical. The function is
    /// idempotent: normalizing a canonical id returns it unchanged.
    pub fn normalize(raw: Option<&str>, existing_ids: &[String]) -> SectionId {
        let token = raw.unwrap_or("").trim();
        let token = token.strip_prefix('#').unwrap_or(token).trim();
        let token = token.trim_end_matches('/');
        if token.is_empty() {
            return Self::default_section();
        }

        let derived = match review_path_slug(token) {
            Some(slug) => format!("{}{}", REVIEW_PREFIX, slug.to_ascii_lowercase()),
            None => {
                let token = strip_markup_extension(token);
                if token.eq_ignore_ascii_case(DEFAULT_SECTION) {
                    DEFAULT_SECTION.to_string()
                } else {
                    token.to_ascii_lowercase()
                }
            }
        };

        if let Some(exact) = existing_ids
            .iter()
            .find(|id| id.eq_ignore_ascii_case(&derived))
        {
            return SectionId(exact.clone());
        }
        SectionId(derived)
    }

    /// The default section as a canonical id.
    pub fn default_section() -> SectionId {
        SectionId(DEFAULT_SECTION.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id names a dynamically discovered review section.
    pub fn is_review(&self) -> bool {
        self.review_slug().is_some()
    }

    /// The `<slug>` part of a `resenha-<slug>` id, if this is a review id.
    pub fn review_slug(&self) -> Option<&str> {
        self.0
            .strip_prefix(REVIEW_PREFIX)
            .filter(|slug| !slug.is_empty())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip one trailing `.html`/`.htm` extension, case-insensitively.
fn strip_markup_extension(token: &str) -> &str {
    for ext in [".html", ".htm"] {
        if token.len() > ext.len()
            && token.as_bytes()[token.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
        {
            // Safe to slice: the matched suffix is pure ASCII.
            return &token[..token.len() - ext.len()];
        }
    }
    token
}

/// If `token` is a path into the reviews directory (`resenhas/foo.html`,
/// `./resenhas/foo`, a full URL containing the segment), return the basename
/// with its markup extension stripped.
fn review_path_slug(token: &str) -> Option<&str> {
    let segments: Vec<&str> = token.split('/').collect();
    let dir_position = segments
        .iter()
        .position(|segment| segment.eq_ignore_ascii_case(REVIEWS_DIR))?;
    let basename = *segments.last()?;
    // The reviews segment must be a directory, not the token itself, so the
    // static "Resenhas" menu section is not mistaken for a review page.
    if dir_position == segments.len() - 1 || basename.is_empty() {
        return None;
    }
    Some(strip_markup_extension(basename))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> SectionId {
        SectionId::normalize(Some(raw), &[])
    }

    #[test]
    fn empty_and_absent_tokens_fall_back_to_home() {
        assert_eq!(SectionId::normalize(None, &[]).as_str(), "Home");
        assert_eq!(normalize("").as_str(), "Home");
        assert_eq!(normalize("#").as_str(), "Home");
        assert_eq!(normalize("  #  ").as_str(), "Home");
    }

    #[test]
    fn case_and_extension_variants_collapse_to_one_id() {
        let variants = ["#Sobre", "sobre", "SOBRE.html", "#sobre.HTM", "Sobre.html"];
        for raw in variants {
            assert_eq!(normalize(raw).as_str(), "sobre", "raw token: {raw}");
        }
    }

    #[test]
    fn default_section_keeps_its_authored_casing() {
        for raw in ["home", "#HOME", "Home.html"] {
            assert_eq!(normalize(raw).as_str(), "Home", "raw token: {raw}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["#Sobre", "resenhas/Dom-Casmurro.html", "", "resenha-foo", "Home"] {
            let once = SectionId::normalize(Some(raw), &[]);
            let twice = SectionId::normalize(Some(once.as_str()), &[]);
            assert_eq!(once, twice, "raw token: {raw}");
        }
    }

    #[test]
    fn dom_authored_casing_wins_over_lowercase_derivation() {
        let existing = vec!["Home".to_string(), "Contato".to_string()];
        assert_eq!(
            SectionId::normalize(Some("#contato"), &existing).as_str(),
            "Contato"
        );
        assert_eq!(
            SectionId::normalize(Some("CONTATO.html"), &existing).as_str(),
            "Contato"
        );
    }

    #[test]
    fn review_paths_become_synthetic_ids() {
        assert_eq!(normalize("resenhas/foo.html").as_str(), "resenha-foo");
        assert_eq!(normalize("./resenhas/foo.html").as_str(), "resenha-foo");
        assert_eq!(
            normalize("https://example.com/site/resenhas/Dom-Casmurro.html").as_str(),
            "resenha-dom-casmurro"
        );
    }

    #[test]
    fn review_ids_expose_their_slug() {
        let id = normalize("resenhas/foo.html");
        assert!(id.is_review());
        assert_eq!(id.review_slug(), Some("foo"));

        let plain = normalize("#Sobre");
        assert!(!plain.is_review());
        assert_eq!(plain.review_slug(), None);
    }

    #[test]
    fn the_static_reviews_menu_section_is_not_a_review_page() {
        assert_eq!(normalize("#Resenhas").as_str(), "resenhas");
        assert!(!normalize("#Resenhas").is_review());
        assert_eq!(normalize("resenhas/").as_str(), "resenhas");
    }

    #[test]
    fn unknown_non_review_ids_are_not_materializable_reviews() {
        let id = normalize("#NoSuchSection");
        assert_eq!(id.as_str(), "nosuchsection");
        assert!(!id.is_review());
    }
}
