use crate::digest::DailyBrief;
use crate::types::{Category, NewsItem};
use chrono::Utc;

/// Bundled static dataset, served only when both the cache and a live
/// aggregation came up empty. Same shape as live data.
pub fn fallback_items() -> Vec<NewsItem> {
    let now = Utc::now();
    vec![
        NewsItem {
            id: "fallback-1".to_string(),
            title: "OpenAI 发布 GPT-4o 全能模型".to_string(),
            summary: "OpenAI 发布了最新的旗舰模型 GPT-4o，具备实时音频、视觉和文本推理能力，并将免费向所有用户开放。".to_string(),
            url: "https://openai.com/index/hello-gpt-4o/".to_string(),
            source: "OpenAI Blog".to_string(),
            date: now,
            category: Category::Llm,
            image_url: Some("https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&q=80&w=800".to_string()),
        },
        NewsItem {
            id: "fallback-2".to_string(),
            title: "Google DeepMind AlphaGeometry 突破".to_string(),
            summary: "AlphaGeometry 系统解决了国际数学奥林匹克竞赛级别的几何题目，无需人类演示即可通过逻辑推理寻找证明。".to_string(),
            url: "https://deepmind.google/discover/blog/alphageometry-an-olympiad-level-ai-system-for-geometry/".to_string(),
            source: "Google DeepMind".to_string(),
            date: now,
            category: Category::Research,
            image_url: Some("https://images.unsplash.com/photo-1620712943543-bcc4688e7485?auto=format&fit=crop&q=80&w=800".to_string()),
        },
        NewsItem {
            id: "fallback-3".to_string(),
            title: "NVIDIA 推出 Blackwell B200 GPU".to_string(),
            summary: "NVIDIA 推出了“世界最强芯片” Blackwell B200 GPU，旨在大幅降低万亿参数大模型的训练和推理成本。".to_string(),
            url: "https://nvidianews.nvidia.com/news/nvidia-blackwell-platform-arrives-to-power-a-new-era-of-computing".to_string(),
            source: "NVIDIA News".to_string(),
            date: now,
            category: Category::Industry,
            image_url: Some("https://images.unsplash.com/photo-1591488320449-011701bb6704?auto=format&fit=crop&q=80&w=800".to_string()),
        },
        NewsItem {
            id: "fallback-4".to_string(),
            title: "Midjourney v6 显著提升图像真实感".to_string(),
            summary: "Midjourney v6 版本正式发布，显著提升了提示词跟随能力、图像连贯性和文本渲染能力，生成效果更加逼真。".to_string(),
            url: "https://www.midjourney.com/home".to_string(),
            source: "Midjourney".to_string(),
            date: now,
            category: Category::ComputerVision,
            image_url: Some("https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?auto=format&fit=crop&q=80&w=800".to_string()),
        },
        NewsItem {
            id: "fallback-5".to_string(),
            title: "LangChain v0.2 正式发布".to_string(),
            summary: "LangChain v0.2 带来了更好的流式支持、标准化的工具调用接口以及更模块化的架构设计。".to_string(),
            url: "https://blog.langchain.dev/langchain-v0-2-released/".to_string(),
            source: "LangChain Blog".to_string(),
            date: now,
            category: Category::Tools,
            image_url: None,
        },
    ]
}

/// Static brief mirroring the bundled dataset, used when brief generation
/// is unavailable.
pub fn fallback_brief() -> DailyBrief {
    let now = Utc::now();
    DailyBrief {
        date: now,
        trending_topic: "多模态大模型与算力升级".to_string(),
        highlights: vec![
            "OpenAI GPT-4o 重新定义人机交互，实时多模态能力惊艳全场。".to_string(),
            "NVIDIA Blackwell 平台开启万亿参数模型计算新时代。".to_string(),
            "Google AlphaGeometry 展示了 AI 在复杂数学推理上的突破。".to_string(),
        ],
        summary_text: "今日 AI 领域的焦点无疑是 OpenAI 发布的 GPT-4o，其端到端的实时多模态能力标志着人机交互迈入新阶段。在硬件层面，NVIDIA 的 Blackwell B200 芯片为未来的巨型模型训练提供了算力保障。与此同时，Google DeepMind 在数学推理领域的突破（AlphaGeometry）再次证明了 AI 在解决复杂逻辑问题上的潜力。".to_string(),
        generated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_is_non_empty_and_well_formed() {
        let items = fallback_items();
        assert_eq!(items.len(), 5);
        for item in &items {
            assert!(!item.id.is_empty());
            assert!(!item.title.is_empty());
            assert!(!item.summary.is_empty());
            assert!(!item.url.is_empty());
        }
    }

    #[test]
    fn dataset_ids_are_unique() {
        let items = fallback_items();
        let mut ids: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn dataset_serializes_like_live_items() {
        let json = serde_json::to_string(&fallback_items()).unwrap();
        let back: Vec<crate::types::NewsItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 5);
    }
}
