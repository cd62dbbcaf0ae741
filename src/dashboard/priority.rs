use std::cmp::Ordering;

use crate::types::Article;

pub const LOWEST_PRIORITY: u8 = 8;

enum NameMatch {
    Contains(&'static str),
    Exact(&'static str),
}

impl NameMatch {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Contains(pattern) => lowered.contains(*pattern),
            Self::Exact(name) => lowered == *name,
        }
    }
}

// The first three rules match by substring, the rest need the whole name.
// Names such as "Zenn Weekly" therefore fall through to the lowest priority.
const PRIORITY_RULES: [(NameMatch, u8); 7] = [
    (NameMatch::Contains("google"), 1),
    (NameMatch::Contains("openai"), 2),
    (NameMatch::Contains("github"), 3),
    (NameMatch::Exact("zenn trends"), 4),
    (NameMatch::Exact("zenn (copilot)"), 5),
    (NameMatch::Exact("qiita trends"), 6),
    (NameMatch::Exact("qiita (copilot)"), 7),
];

/// Display rank of a source, lower comes first.
pub fn source_priority(source_name: Option<&str>) -> u8 {
    let lowered = source_name.unwrap_or_default().to_lowercase();

    PRIORITY_RULES
        .iter()
        .find(|(rule, _)| rule.matches(&lowered))
        .map_or(LOWEST_PRIORITY, |(_, priority)| *priority)
}

/// Ascending priority, then newest publish date. Articles without a
/// publish date go last within their priority.
pub fn display_order(a: &Article, b: &Article) -> Ordering {
    source_priority(a.source_name())
        .cmp(&source_priority(b.source_name()))
        .then_with(|| b.published_at.cmp(&a.published_at))
}

/// Stable in-place sort for display.
pub fn sort_for_display(articles: &mut [Article]) {
    articles.sort_by(display_order);
}
