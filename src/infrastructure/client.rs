use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::debug;

/// Fetches pages the way a link-preview crawler does: a crawler user agent,
/// no automatic HTTP redirects, and only the `<meta>` tags are inspected.
pub struct ProbeClient {
    http: Client,
}

/// What a crawler would take away from a single fetch.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub url: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub metadata: PageMetadata,
    /// Whether `og:url` names the fetched URL; absent without an `og:url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_url_matches: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub og_url: Option<String>,
    pub og_title: Option<String>,
    pub canonical: Option<String>,
    pub meta_refresh: Option<String>,
}

impl ProbeClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to configure HTTP client")?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, url: &Url) -> Result<ProbeReport> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to fetch {url}"))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body of {url}"))?;

        let mut metadata = extract_metadata(&body);
        metadata.meta_refresh = metadata
            .meta_refresh
            .take()
            .map(|target| url.join(&target).map_or(target, String::from));

        let og_url_matches = metadata
            .og_url
            .as_deref()
            .map(|og_url| Url::parse(og_url).is_ok_and(|parsed| &parsed == url));

        debug!(%url, status, ?metadata, "probed page");

        Ok(ProbeReport {
            url: url.to_string(),
            status,
            location,
            metadata,
            og_url_matches,
        })
    }

    /// Fetch `url` and then up to `max_hops` meta-refresh targets.
    pub async fn follow(&self, url: &Url, max_hops: usize) -> Result<Vec<ProbeReport>> {
        let mut reports = Vec::new();
        let mut current = url.clone();

        loop {
            let report = self.fetch(&current).await?;
            let next = report.metadata.meta_refresh.clone();
            reports.push(report);

            if reports.len() > max_hops {
                break;
            }
            let Some(next) = next else {
                break;
            };
            current = Url::parse(&next).with_context(|| format!("invalid refresh target {next}"))?;
        }

        Ok(reports)
    }
}

/// Pull the crawler-relevant tags out of an HTML document.
///
/// This is a tag scanner, not an HTML parser: it looks at `<meta>` and
/// `<link>` start tags with quoted attribute values.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let lower = html.to_ascii_lowercase();
    let mut metadata = PageMetadata::default();

    for (start, end) in start_tags(&lower, "<meta") {
        let tag = &html[start..end];
        let lower_tag = &lower[start..end];
        let key = attribute(tag, lower_tag, "property").or_else(|| attribute(tag, lower_tag, "name"));
        let content = attribute(tag, lower_tag, "content");

        match (key.as_deref(), content) {
            (Some("og:url"), Some(content)) if metadata.og_url.is_none() => {
                metadata.og_url = Some(content);
            }
            (Some("og:title"), Some(content)) if metadata.og_title.is_none() => {
                metadata.og_title = Some(content);
            }
            _ => {}
        }

        let is_refresh = attribute(tag, lower_tag, "http-equiv")
            .is_some_and(|value| value.eq_ignore_ascii_case("refresh"));
        if is_refresh && metadata.meta_refresh.is_none() {
            metadata.meta_refresh = attribute(tag, lower_tag, "content")
                .as_deref()
                .and_then(refresh_target);
        }
    }

    for (start, end) in start_tags(&lower, "<link") {
        let tag = &html[start..end];
        let lower_tag = &lower[start..end];
        let is_canonical =
            attribute(tag, lower_tag, "rel").is_some_and(|rel| rel.eq_ignore_ascii_case("canonical"));
        if is_canonical && metadata.canonical.is_none() {
            metadata.canonical = attribute(tag, lower_tag, "href");
        }
    }

    metadata
}

/// Byte ranges of every start tag beginning with `opener` in `lower`.
fn start_tags<'a>(lower: &'a str, opener: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut offset = 0;
    std::iter::from_fn(move || {
        let start = offset + lower[offset..].find(opener)?;
        let end = start + lower[start..].find('>')? + 1;
        offset = end;
        Some((start, end))
    })
}

fn attribute(tag: &str, lower_tag: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=");
    let mut search_from = 0;

    while let Some(found) = lower_tag[search_from..].find(&needle) {
        let at = search_from + found;
        search_from = at + needle.len();

        let preceded_by_space = lower_tag[..at]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !preceded_by_space {
            continue;
        }

        let rest = &tag[at + needle.len()..];
        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value = &rest[1..];
        let close = value.find(quote)?;
        return Some(decode_entities(&value[..close]));
    }

    None
}

/// `0; url=https://…` → `https://…`
fn refresh_target(content: &str) -> Option<String> {
    let lower = content.to_ascii_lowercase();
    let at = lower.find("url=")?;
    let target = content[at + 4..]
        .trim()
        .trim_matches(|c| c == '\'' || c == '"');
    (!target.is_empty()).then(|| target.to_string())
}

fn decode_entities(value: &str) -> String {
    html_escape::decode_html_entities(value).into_owned()
}
