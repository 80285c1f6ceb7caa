//! Named crawl/extract jobs for the documentation sets mirrored by default.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::crawl::{CrawlConfig, CrawlConfigBuilder};
use crate::{MirrorError, Result};

/// One documentation set: where to crawl and where both stages write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub seed_url: &'static str,
    pub allowed_domain: &'static str,
    /// Crawl output, extraction input
    pub html_dir: &'static str,
    /// Extraction output
    pub text_dir: &'static str,
}

/// Google Apps Script reference.
pub const GAS: Preset = Preset {
    name: "gas",
    seed_url: "https://developers.google.com/apps-script/reference/",
    allowed_domain: "developers.google.com",
    html_dir: "gas_docs_html",
    text_dir: "gas_docs_txt",
};

/// Gemini API documentation.
pub const GEMINI: Preset = Preset {
    name: "gemini",
    seed_url: "https://ai.google.dev/gemini-api/docs/",
    allowed_domain: "ai.google.dev",
    html_dir: "gemini_api_docs_html",
    text_dir: "gemini_api_docs_txt",
};

static ALL: [Preset; 2] = [GAS, GEMINI];

impl Preset {
    /// Every built-in preset, in the order they run.
    pub fn all() -> &'static [Preset] {
        &ALL
    }

    /// Looks a preset up by name.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::ConfigError`] listing the known names if there is no match.
    pub fn find(name: &str) -> Result<&'static Preset> {
        ALL.iter().find(|preset| preset.name.eq_ignore_ascii_case(name)).ok_or_else(|| {
            let known = ALL.iter().map(|preset| preset.name).collect::<Vec<_>>().join(", ");
            MirrorError::ConfigError(format!("Unknown preset '{name}'. Known presets: {known}"))
        })
    }

    /// Selects one named preset, or all of them when no name is given.
    pub fn select(name: Option<&str>) -> Result<Vec<&'static Preset>> {
        match name {
            Some(name) => Ok(vec![Self::find(name)?]),
            None => Ok(ALL.iter().collect()),
        }
    }

    pub fn html_dir(&self) -> PathBuf {
        PathBuf::from(self.html_dir)
    }

    pub fn text_dir(&self) -> PathBuf {
        PathBuf::from(self.text_dir)
    }

    /// Crawl builder pre-filled with this preset's seed, domain and html dir.
    pub fn crawl_builder(&self) -> CrawlConfigBuilder {
        CrawlConfig::builder(self.seed_url, self.html_dir, self.allowed_domain)
    }

    /// Crawl configuration with the given pause between fetches.
    pub fn crawl_config(&self, wait: Duration) -> CrawlConfig {
        self.crawl_builder().wait(wait).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::CrawlScope;

    #[test]
    fn test_all_presets() {
        let names: Vec<_> = Preset::all().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["gas", "gemini"]);
    }

    #[test]
    fn test_find() {
        assert_eq!(Preset::find("gemini").unwrap().allowed_domain, "ai.google.dev");
        assert_eq!(Preset::find("GAS").unwrap().html_dir, "gas_docs_html");
    }

    #[test]
    fn test_find_unknown() {
        let err = Preset::find("mdn").unwrap_err();
        assert!(matches!(err, MirrorError::ConfigError(_)));
        assert!(err.to_string().contains("gas, gemini"));
    }

    #[test]
    fn test_select() {
        assert_eq!(Preset::select(None).unwrap().len(), 2);
        assert_eq!(Preset::select(Some("gas")).unwrap(), vec![&GAS]);
    }

    #[test]
    fn test_presets_form_valid_scopes() {
        for preset in Preset::all() {
            let scope = CrawlScope::new(preset.seed_url, preset.allowed_domain).unwrap();
            assert!(scope.matches_domain(scope.seed()), "{}", preset.name);
        }
    }

    #[test]
    fn test_crawl_config() {
        let config = GEMINI.crawl_config(Duration::from_secs(2));
        assert_eq!(config.seed_url, GEMINI.seed_url);
        assert_eq!(config.output_dir, PathBuf::from("gemini_api_docs_html"));
        assert_eq!(config.wait, Duration::from_secs(2));
    }
}
