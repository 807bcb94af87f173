//! Declared configuration of the section router.

use super::section_id::REVIEWS_DIR;

/// Where fragments live and how their content element is discovered.
///
/// The extraction selectors are an ordered contract: the first selector that
/// matches anything in a fetched document wins. Fragment authors may wrap
/// their content in the dedicated marker or rely on the structural fallbacks.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Directory fragment files are served from, relative to the shell.
    pub content_root: String,
    /// Subdirectory of `content_root` holding review fragments.
    pub reviews_dir: String,
    /// Id of the element dynamically created containers are appended to.
    pub app_root_id: String,
    /// Selectors tried in order when extracting a fragment's content element.
    pub extraction_selectors: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            content_root: "html".to_string(),
            reviews_dir: REVIEWS_DIR.to_string(),
            app_root_id: "app-content".to_string(),
            extraction_selectors: vec![
                ".content".to_string(),
                "section".to_string(),
                "main".to_string(),
                "body".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_priority_is_marker_then_structural_fallbacks() {
        let config = RouterConfig::default();
        assert_eq!(
            config.extraction_selectors,
            vec![".content", "section", "main", "body"]
        );
    }
}
