use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

const CNBC_TOP_NEWS_RSS: &str = "https://www.cnbc.com/id/15839069/device/rss/rss.html";
const MAX_HEADLINES: usize = 5;

/// Titles must hit one of these (or the ticker itself) to count as a
/// market driver.
const MARKET_KEYWORDS: &[&str] = &[
    "business",
    "economy",
    "regulation",
    "policy",
    "growth",
    "earnings",
    "revenue",
    "strategy",
    "tech",
    "sector",
    "tax",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published: String,
    pub source: String,
}

/// Fetch the market feed and keep headlines relevant to the ticker.
/// Any fetch or parse failure degrades to an empty list; headlines are
/// decoration, not analysis input.
pub async fn fetch_headlines(symbol: &str) -> Vec<NewsItem> {
    let client = Client::new();
    let body = match client.get(CNBC_TOP_NEWS_RSS).send().await {
        Ok(resp) => match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("news feed body unreadable: {}", e);
                return Vec::new();
            }
        },
        Err(e) => {
            warn!("news feed unreachable: {}", e);
            return Vec::new();
        }
    };

    let items = parse_feed_items(&body);
    filter_headlines(items, symbol)
}

/// Keyword filter over already-fetched items: fixed market keywords plus
/// the lowercased ticker, capped at five results.
pub fn filter_headlines(items: Vec<NewsItem>, symbol: &str) -> Vec<NewsItem> {
    let ticker = symbol.to_lowercase();
    items
        .into_iter()
        .filter(|item| {
            let title = item.title.to_lowercase();
            title.contains(&ticker) || MARKET_KEYWORDS.iter().any(|kw| title.contains(kw))
        })
        .take(MAX_HEADLINES)
        .collect()
}

/// Pull `<item>` title/link/pubDate triples out of an RSS document.
/// Deliberately narrow: enough for the fixed feed shape, nothing more.
pub fn parse_feed_items(body: &str) -> Vec<NewsItem> {
    let mut items = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("<item>") {
        let Some(end) = rest[start..].find("</item>") else {
            break;
        };
        let block = &rest[start + "<item>".len()..start + end];
        rest = &rest[start + end + "</item>".len()..];

        let Some(title) = tag_text(block, "title") else {
            continue;
        };
        items.push(NewsItem {
            title,
            link: tag_text(block, "link").unwrap_or_default(),
            published: tag_text(block, "pubDate").unwrap_or_default(),
            source: "CNBC".to_string(),
        });
    }
    items
}

fn tag_text(block: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = block.find(&open)? + open.len();
    let end = block[start..].find(&close)? + start;
    let raw = block[start..end].trim();

    // Feed titles arrive either CDATA-wrapped or entity-escaped
    let text = raw
        .strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(raw);
    Some(unescape_entities(text.trim()))
}

fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Top News</title>
    <item>
      <title><![CDATA[Chipmaker earnings beat expectations]]></title>
      <link>https://example.com/a</link>
      <pubDate>Mon, 03 Aug 2026 12:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Celebrity opens a new restaurant</title>
      <link>https://example.com/b</link>
      <pubDate>Mon, 03 Aug 2026 13:00:00 GMT</pubDate>
    </item>
    <item>
      <title>NVDA rally continues after product launch</title>
      <link>https://example.com/c</link>
      <pubDate>Mon, 03 Aug 2026 14:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_items() {
        let items = parse_feed_items(FEED);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Chipmaker earnings beat expectations");
        assert_eq!(items[0].link, "https://example.com/a");
        assert_eq!(items[0].source, "CNBC");
        assert_eq!(items[2].title, "NVDA rally continues after product launch");
    }

    #[test]
    fn test_filter_keeps_keywords_and_ticker() {
        let items = parse_feed_items(FEED);
        let filtered = filter_headlines(items, "NVDA");

        // "earnings" keyword and the ticker itself match; the
        // restaurant headline does not
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|i| !i.title.contains("restaurant")));
    }

    #[test]
    fn test_filter_caps_results() {
        let items: Vec<NewsItem> = (0..10)
            .map(|i| NewsItem {
                title: format!("Economy update {}", i),
                link: String::new(),
                published: String::new(),
                source: "CNBC".to_string(),
            })
            .collect();
        assert_eq!(filter_headlines(items, "AAPL").len(), 5);
    }

    #[test]
    fn test_malformed_feed_degrades_to_empty() {
        assert!(parse_feed_items("<html>not a feed</html>").is_empty());
        assert!(parse_feed_items("<item><title>unterminated").is_empty());
    }

    #[test]
    fn test_entity_unescaping() {
        let body = "<item><title>M&amp;A heats up in tech</title></item>";
        let items = parse_feed_items(body);
        assert_eq!(items[0].title, "M&A heats up in tech");
    }
}
