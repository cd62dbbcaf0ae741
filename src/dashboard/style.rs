use std::borrow::Cow;

use serde::Serialize;

/// Card badge for a source: a CSS background and a short label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStyle {
    pub background: &'static str,
    pub icon: Cow<'static, str>,
}

struct StyleRule {
    pattern: &'static str,
    background: &'static str,
    icon: &'static str,
}

// First match wins.
const STYLE_RULES: [StyleRule; 5] = [
    StyleRule {
        pattern: "google",
        background: "linear-gradient(135deg, #4285F4 0% 25%, #EA4335 25% 50%, #FBBC05 50% 75%, #34A853 75% 100%)",
        icon: "G",
    },
    StyleRule {
        pattern: "openai",
        background: "linear-gradient(135deg, #10a37f, #007c66)",
        icon: "O",
    },
    StyleRule {
        pattern: "github",
        background: "linear-gradient(135deg, #24292e, #6e7681)",
        icon: "GH",
    },
    StyleRule {
        pattern: "zenn",
        background: "linear-gradient(135deg, #3ea8ff, #007bb6)",
        icon: "Zn",
    },
    StyleRule {
        pattern: "qiita",
        background: "linear-gradient(135deg, #55c500, #2da600)",
        icon: "Qi",
    },
];

const FALLBACK_BACKGROUND: &str = "linear-gradient(135deg, #6c757d, #adb5bd)";

/// Resolves the badge for a source name.
///
/// Matching is a case-insensitive substring test. Unknown sources get a grey
/// badge labelled with the first character of the name, or `?` when there is
/// no name.
pub fn resolve(source_name: Option<&str>) -> SourceStyle {
    let name = source_name.unwrap_or_default();
    let lowered = name.to_lowercase();

    STYLE_RULES
        .iter()
        .find(|rule| lowered.contains(rule.pattern))
        .map(|rule| SourceStyle {
            background: rule.background,
            icon: Cow::Borrowed(rule.icon),
        })
        .unwrap_or_else(|| SourceStyle {
            background: FALLBACK_BACKGROUND,
            icon: fallback_icon(name),
        })
}

fn fallback_icon(name: &str) -> Cow<'static, str> {
    match name.chars().next() {
        Some(first) => Cow::Owned(first.to_uppercase().collect()),
        None => Cow::Borrowed("?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_in_any_case() {
        for name in ["OpenAI Blog", "openai", "The OPENAI News", "oPeNaI research"] {
            assert_eq!(resolve(Some(name)).icon, "O", "{name}");
        }
    }

    #[test]
    fn known_sources() {
        assert_eq!(resolve(Some("Google News")).icon, "G");
        assert_eq!(resolve(Some("GitHub Changelog")).icon, "GH");
        assert_eq!(resolve(Some("Zenn Trends")).icon, "Zn");
        assert_eq!(resolve(Some("Zenn Weekly")).icon, "Zn");
        assert_eq!(resolve(Some("Qiita (Copilot)")).icon, "Qi");
        assert_eq!(
            resolve(Some("GitHub")).background,
            "linear-gradient(135deg, #24292e, #6e7681)"
        );
    }

    #[test]
    fn earlier_rule_wins() {
        assert_eq!(resolve(Some("Google on GitHub")).icon, "G");
    }

    #[test]
    fn unknown_source_uses_first_letter() {
        let style = resolve(Some("Hacker News"));
        assert_eq!(style.icon, "H");
        assert_eq!(style.background, FALLBACK_BACKGROUND);

        assert_eq!(resolve(Some("lobste.rs")).icon, "L");
        assert_eq!(resolve(Some("ítmedia")).icon, "Í");
    }

    #[test]
    fn missing_name_is_question_mark() {
        assert_eq!(resolve(None).icon, "?");
        assert_eq!(resolve(Some("")).icon, "?");
        assert_eq!(resolve(None).background, FALLBACK_BACKGROUND);
    }
}
