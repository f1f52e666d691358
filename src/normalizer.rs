use crate::classifier;
use crate::types::{Category, EnrichmentResult, NewsItem, RawFeedItem, SourceConfig};
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Rotating pool used when a source supplies no embeddable media.
const PLACEHOLDER_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1620712943543-bcc4688e7485?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1591488320449-011701bb6704?auto=format&fit=crop&q=80&w=800",
];

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

fn img_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid image regex"))
}

/// Remove markup and decode entities, collapsing the result to plain text.
pub fn strip_html(text: &str) -> String {
    let without_tags = tag_re().replace_all(text, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First embedded image reference in raw entry content, if any.
pub fn extract_image(raw_content: &str) -> Option<String> {
    img_re()
        .captures(raw_content)
        .map(|caps| caps[1].to_string())
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max).collect();
        format!("{}...", prefix)
    }
}

/// Turn one raw item plus its enrichment outcome into a canonical record.
/// Never fails: every field has a defined fallback.
pub fn normalize(
    raw: &RawFeedItem,
    enrichment: Option<EnrichmentResult>,
    source: &SourceConfig,
    index: usize,
    summary_max_len: usize,
) -> NewsItem {
    let raw_title = raw.title.clone().unwrap_or_else(|| "无标题".to_string());
    let raw_summary = strip_html(raw.body.as_deref().unwrap_or(""));

    let (title, summary, category_label) = match enrichment {
        Some(e) => (e.title, e.summary, e.category_label),
        None => (raw_title, raw_summary, String::new()),
    };
    let summary = truncate_chars(&summary, summary_max_len);

    // Closed-set validation: an out-of-set suggestion is discarded and the
    // category re-derived by rule; with no text to scan at all, the source's
    // default applies.
    let category = Category::from_label(&category_label).unwrap_or_else(|| {
        if title == "无标题" && summary.is_empty() {
            source.default_category
        } else {
            classifier::classify(&title, &summary)
        }
    });

    let id = raw
        .guid
        .clone()
        .or_else(|| raw.link.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let image_url = raw
        .raw_content
        .as_deref()
        .and_then(extract_image)
        .or_else(|| {
            PLACEHOLDER_IMAGES
                .get(index % PLACEHOLDER_IMAGES.len())
                .map(|url| url.to_string())
        });

    NewsItem {
        id,
        title,
        summary,
        url: raw.link.clone().unwrap_or_else(|| "#".to_string()),
        source: source.name.clone(),
        date: raw.published_at.unwrap_or_else(Utc::now),
        category,
        image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_source() -> SourceConfig {
        SourceConfig::new("https://example.com/rss", "Example", Category::Industry)
    }

    fn raw_item(guid: Option<&str>, link: Option<&str>) -> RawFeedItem {
        RawFeedItem {
            guid: guid.map(String::from),
            link: link.map(String::from),
            title: Some("GPT-5 rumors".to_string()),
            body: Some("<p>Some &amp; strong <b>rumors</b></p>".to_string()),
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
            raw_content: None,
        }
    }

    #[test]
    fn strips_markup_and_decodes_entities() {
        assert_eq!(
            strip_html("<p>Some &amp; strong <b>rumors</b></p>"),
            "Some & strong rumors"
        );
    }

    #[test]
    fn id_prefers_guid_then_link_then_random() {
        let src = test_source();
        let with_guid = normalize(&raw_item(Some("g-1"), Some("https://l")), None, &src, 0, 150);
        assert_eq!(with_guid.id, "g-1");

        let with_link = normalize(&raw_item(None, Some("https://l")), None, &src, 0, 150);
        assert_eq!(with_link.id, "https://l");

        let random = normalize(&raw_item(None, None), None, &src, 0, 150);
        assert!(!random.id.is_empty());
        assert!(Uuid::parse_str(&random.id).is_ok());
    }

    #[test]
    fn missing_date_defaults_to_now() {
        let src = test_source();
        let mut raw = raw_item(Some("g"), None);
        raw.published_at = None;
        let before = Utc::now();
        let item = normalize(&raw, None, &src, 0, 150);
        assert!(item.date >= before && item.date <= Utc::now());
    }

    #[test]
    fn placeholder_image_rotates_by_index() {
        let src = test_source();
        let raw = raw_item(Some("g"), None);
        let first = normalize(&raw, None, &src, 0, 150);
        let second = normalize(&raw, None, &src, 1, 150);
        let wrapped = normalize(&raw, None, &src, 3, 150);
        assert_ne!(first.image_url, second.image_url);
        assert_eq!(first.image_url, wrapped.image_url);
    }

    #[test]
    fn extracted_image_wins_over_placeholder() {
        let src = test_source();
        let mut raw = raw_item(Some("g"), None);
        raw.raw_content =
            Some(r#"<img src="https://example.com/pic.png"> and text"#.to_string());
        let item = normalize(&raw, None, &src, 0, 150);
        assert_eq!(item.image_url.as_deref(), Some("https://example.com/pic.png"));
    }

    #[test]
    fn out_of_set_enrichment_category_is_rederived() {
        let src = test_source();
        let enrichment = EnrichmentResult {
            title: "GPT-4 突破".to_string(),
            summary: "关于 GPT-4 的报道".to_string(),
            category_label: "Sports".to_string(),
        };
        let item = normalize(&raw_item(Some("g"), None), Some(enrichment), &src, 0, 150);
        assert_eq!(item.category, Category::Llm);
    }

    #[test]
    fn valid_enrichment_category_is_kept() {
        let src = test_source();
        let enrichment = EnrichmentResult {
            title: "一则新闻".to_string(),
            summary: "平平无奇".to_string(),
            category_label: "Research".to_string(),
        };
        let item = normalize(&raw_item(Some("g"), None), Some(enrichment), &src, 0, 150);
        assert_eq!(item.category, Category::Research);
    }

    #[test]
    fn empty_item_falls_back_to_source_default() {
        let src = SourceConfig::new("https://example.com/rss", "Example", Category::Tools);
        let raw = RawFeedItem::default();
        let item = normalize(&raw, None, &src, 0, 150);
        assert_eq!(item.category, Category::Tools);
        assert_eq!(item.url, "#");
    }

    #[test]
    fn long_summary_is_truncated() {
        let src = test_source();
        let mut raw = raw_item(Some("g"), None);
        raw.body = Some("x".repeat(500));
        let item = normalize(&raw, None, &src, 0, 150);
        assert!(item.summary.ends_with("..."));
        assert_eq!(item.summary.chars().count(), 153);
    }
}
