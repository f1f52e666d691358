use crate::enrichment::Enricher;
use crate::types::{AggregatorError, NewsItem, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Token control: only the newest items feed the brief.
const BRIEF_ITEM_LIMIT: usize = 10;

const BRIEF_SYSTEM_PROMPT: &str = "You are a helpful AI news editor. You summarize tech news \
into concise, engaging daily briefs written in Chinese. Respond with pure JSON (no markdown \
code fences).";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBrief {
    pub date: DateTime<Utc>,
    #[serde(rename = "trendingTopic")]
    pub trending_topic: String,
    pub highlights: Vec<String>,
    #[serde(rename = "summaryText")]
    pub summary_text: String,
    #[serde(rename = "generatedAt", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Generate a daily brief over the freshest items. This is the one feature
/// that genuinely needs the language model; without the capability the
/// caller falls back to the bundled static brief.
pub async fn generate_brief(enricher: &dyn Enricher, items: &[NewsItem]) -> Result<DailyBrief> {
    if items.is_empty() {
        return Err(AggregatorError::General(
            "no news available to summarize".to_string(),
        ));
    }

    let listing = items
        .iter()
        .take(BRIEF_ITEM_LIMIT)
        .enumerate()
        .map(|(i, item)| format!("{}. {}\n{}", i + 1, item.title, item.summary))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = format!(
        "请根据以下最新的 AI 新闻，生成一份每日简报。\n\n新闻列表：\n{}\n\n\
         请返回纯 JSON 格式，包含以下字段：\n\
         - trendingTopic: (字符串) 根据新闻内容总结的一个热门话题短语。\n\
         - highlights: (字符串数组) 3 个关键新闻亮点的简短列表，每个亮点一句话。\n\
         - summaryText: (字符串) 一段 150-200 字的连贯总结文本，概述今天的 AI 重点动态。\n\n\
         请确保所有内容使用中文。",
        listing
    );

    let value = enricher.complete_json(BRIEF_SYSTEM_PROMPT, &prompt).await?;

    // Malformed model output degrades field by field rather than failing.
    let trending_topic = value
        .get("trendingTopic")
        .and_then(|v| v.as_str())
        .unwrap_or("AI 今日动态")
        .to_string();
    let highlights = value
        .get("highlights")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|h| h.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    let summary_text = value
        .get("summaryText")
        .and_then(|v| v.as_str())
        .unwrap_or("无法生成总结。")
        .to_string();

    info!(
        "Generated daily brief over {} items: {}",
        items.len().min(BRIEF_ITEM_LIMIT),
        trending_topic
    );

    let now = Utc::now();
    Ok(DailyBrief {
        date: now,
        trending_topic,
        highlights,
        summary_text,
        generated_at: Some(now),
    })
}
