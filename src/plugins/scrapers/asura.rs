use crate::config::ScraperConfig;
use crate::plugins::traits::{ChapterInfo, SiteScraper};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

const TITLE_SELECTOR: &str = "h1";
// Tailwind grid holding the chapter links, newest first
const CHAPTER_LIST_SELECTOR: &str = r"div.grid.md\:grid-cols-2.lg\:grid-cols-3";
const CHAPTER_LINK_SELECTOR: &str = "a";

/// Adapter for asuracomic.net series pages.
pub struct AsuraScraper {
    client: Client,
    title_selector: Selector,
    chapter_list_selector: Selector,
    chapter_link_selector: Selector,
    url_number_regex: Regex,
    text_number_regex: Regex,
}

impl AsuraScraper {
    pub const SITE: &'static str = "asura";

    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            title_selector: parse_selector(TITLE_SELECTOR)?,
            chapter_list_selector: parse_selector(CHAPTER_LIST_SELECTOR)?,
            chapter_link_selector: parse_selector(CHAPTER_LINK_SELECTOR)?,
            url_number_regex: parse_regex(r"chapter/(\d+)")?,
            text_number_regex: parse_regex(r"\b(\d+)\b")?,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Extracts the series title and newest chapter from a series page.
    pub fn parse_series_page(&self, html: &str) -> Result<ChapterInfo> {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title_selector)
            .next()
            .map(element_text)
            .ok_or_else(|| AppError::ElementNotFound {
                selector: TITLE_SELECTOR.to_string(),
            })?;

        let chapter_list = document
            .select(&self.chapter_list_selector)
            .next()
            .ok_or_else(|| AppError::ElementNotFound {
                selector: CHAPTER_LIST_SELECTOR.to_string(),
            })?;

        let latest_link = chapter_list
            .select(&self.chapter_link_selector)
            .next()
            .ok_or_else(|| AppError::ElementNotFound {
                selector: format!("{} {}", CHAPTER_LIST_SELECTOR, CHAPTER_LINK_SELECTOR),
            })?;

        let chapter_url = latest_link
            .value()
            .attr("href")
            .ok_or_else(|| AppError::Parse {
                message: "latest chapter link has no href".to_string(),
            })?
            .to_string();

        let chapter_number = self
            .extract_chapter_number(&chapter_url, &element_text(latest_link))
            .ok_or_else(|| AppError::Parse {
                message: format!("no chapter number in link '{}'", chapter_url),
            })?;

        Ok(ChapterInfo {
            title,
            chapter_number,
            chapter_url,
        })
    }

    /// Reads the chapter number from a `chapter/<n>` URL segment, falling back to the first
    /// standalone integer in the link text.
    ///
    /// The text fallback is a heuristic: a label such as "Part 2 - Chapter 10" yields 2.
    /// Fractional chapters ("12.5") are truncated to their leading digit run.
    pub fn extract_chapter_number(&self, href: &str, link_text: &str) -> Option<u64> {
        first_number(&self.url_number_regex, href)
            .or_else(|| first_number(&self.text_number_regex, link_text))
    }
}

#[async_trait]
impl SiteScraper for AsuraScraper {
    fn name(&self) -> &str {
        "Asura Scans"
    }

    async fn get_latest_chapter(&self, series_url: &str) -> Option<ChapterInfo> {
        let html = match self.fetch_page(series_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", series_url, e);
                return None;
            }
        };

        match self.parse_series_page(&html) {
            Ok(info) => {
                tracing::debug!(
                    "{}: '{}' latest chapter {} ({})",
                    self.name(),
                    info.title,
                    info.chapter_number,
                    info.chapter_url
                );
                Some(info)
            }
            Err(e) => {
                tracing::warn!("Could not read latest chapter for {}: {}", series_url, e);
                None
            }
        }
    }
}

fn first_number(regex: &Regex, haystack: &str) -> Option<u64> {
    regex.captures(haystack)?.get(1)?.as_str().parse().ok()
}

/// Element text with surrounding whitespace trimmed. Inner whitespace is kept as is,
/// since the title is used verbatim as the catalog key.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Parse {
        message: format!("invalid selector '{}': {}", selector, e),
    })
}

fn parse_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AppError::Parse {
        message: format!("invalid pattern '{}': {}", pattern, e),
    })
}
