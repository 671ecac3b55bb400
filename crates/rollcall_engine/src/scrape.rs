use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{ScrapeError, WireParticipant};

/// Labels the call page renders in participant tiles that are not people:
/// merged audio, and the attended / no response / declined status chips.
pub const DEFAULT_EXCLUDED_LABELS: [&str; 4] = ["병합된 오디오", "참석함", "응답 없음", "거절함"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSettings {
    pub tile_selector: String,
    pub avatar_selector: String,
    pub label_selector: String,
    /// Tiles whose label equals one of these exactly are dropped.
    pub excluded_labels: Vec<String>,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            tile_selector: r#"div[role="listitem"]"#.to_string(),
            avatar_selector: "img".to_string(),
            label_selector: "span".to_string(),
            excluded_labels: DEFAULT_EXCLUDED_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// The call page as the page agent sees it for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub html: String,
    /// Used to resolve relative avatar URLs, like `img.src` does in a browser.
    pub base_url: Option<Url>,
}

impl PageSnapshot {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

pub trait ParticipantScraper: Send + Sync {
    fn scrape(&self, snapshot: &PageSnapshot) -> Vec<WireParticipant>;
}

/// Selector-driven scraper over participant list items.
///
/// For every tile:
/// - `imgSrc` is the first avatar image's `src`, resolved against the base URL
/// - `text` is the full text of the first label element, untrimmed
///
/// Tiles missing either part are kept with that field absent.
#[derive(Debug)]
pub struct DomScraper {
    tile: Selector,
    avatar: Selector,
    label: Selector,
    excluded_labels: Vec<String>,
}

impl DomScraper {
    pub fn new(settings: &ScrapeSettings) -> Result<Self, ScrapeError> {
        Ok(Self {
            tile: parse_selector(&settings.tile_selector)?,
            avatar: parse_selector(&settings.avatar_selector)?,
            label: parse_selector(&settings.label_selector)?,
            excluded_labels: settings.excluded_labels.clone(),
        })
    }

    fn is_excluded(&self, text: Option<&str>) -> bool {
        match text {
            Some(text) => self.excluded_labels.iter().any(|label| label == text),
            None => false,
        }
    }

    fn read_tile(&self, tile: ElementRef<'_>, base_url: Option<&Url>) -> WireParticipant {
        let img_src = tile
            .select(&self.avatar)
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty())
            .map(|src| resolve_src(src, base_url));
        let text = tile
            .select(&self.label)
            .next()
            .map(|label| label.text().collect::<String>());
        WireParticipant { img_src, text }
    }
}

impl ParticipantScraper for DomScraper {
    fn scrape(&self, snapshot: &PageSnapshot) -> Vec<WireParticipant> {
        let doc = Html::parse_document(&snapshot.html);
        doc.select(&self.tile)
            .map(|tile| self.read_tile(tile, snapshot.base_url.as_ref()))
            .filter(|p| !self.is_excluded(p.text.as_deref()))
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|err| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn resolve_src(src: &str, base_url: Option<&Url>) -> String {
    match base_url.and_then(|base| base.join(src).ok()) {
        Some(resolved) => resolved.to_string(),
        None => src.to_string(),
    }
}
