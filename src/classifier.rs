use crate::types::Category;

/// Priority-ordered keyword groups; first match wins. The order is a
/// deliberate tie-break: a text mentioning both "gpt" and "paper"
/// classifies as LLM.
const KEYWORD_GROUPS: &[(&[&str], Category)] = &[
    (&["gpt", "llm", "大模型", "claude", "llama"], Category::Llm),
    (
        &["vision", "image", "video", "midjourney", "sora", "视觉"],
        Category::ComputerVision,
    ),
    (
        &["paper", "research", "arxiv", "论文", "研究"],
        Category::Research,
    ),
    (
        &["tool", "framework", "langchain", "library", "工具"],
        Category::Tools,
    ),
];

/// Deterministic keyword classifier. Used both as the no-enrichment
/// fallback and as the validator for enrichment output.
pub fn classify(title: &str, summary: &str) -> Category {
    let text = format!("{}{}", title, summary).to_lowercase();

    for (keywords, category) in KEYWORD_GROUPS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *category;
        }
    }

    Category::Industry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_group() {
        assert_eq!(classify("New LLM released", ""), Category::Llm);
        assert_eq!(classify("Sora video model", ""), Category::ComputerVision);
        assert_eq!(classify("New arXiv preprint", ""), Category::Research);
        assert_eq!(classify("A framework for agents", ""), Category::Tools);
    }

    #[test]
    fn scans_title_and_summary() {
        assert_eq!(classify("Weekly digest", "covers Claude updates"), Category::Llm);
    }

    #[test]
    fn llm_wins_over_research_on_ties() {
        assert_eq!(
            classify("GPT-4 research paper published", ""),
            Category::Llm
        );
    }

    #[test]
    fn vision_wins_over_tools_on_ties() {
        assert_eq!(
            classify("An image generation library", ""),
            Category::ComputerVision
        );
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(classify("MIDJOURNEY update", ""), Category::ComputerVision);
    }

    #[test]
    fn matches_chinese_keywords() {
        assert_eq!(classify("国产大模型进展", ""), Category::Llm);
        assert_eq!(classify("", "最新论文解读"), Category::Research);
    }

    #[test]
    fn defaults_to_industry() {
        assert_eq!(classify("Funding round closes", "startup raises"), Category::Industry);
        assert_eq!(classify("", ""), Category::Industry);
    }
}
