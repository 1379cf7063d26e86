//! System prompt composition from stored bot configuration.
//!
//! Two shapes exist:
//! - the streaming widget uses the bot's own training text verbatim, or a
//!   one-line default built from its name and description;
//! - the JSON reply endpoint additionally spells out the template's role and
//!   capabilities and quotes an excerpt of the knowledge base.

use std::fmt::Write;

use botforge_types::bot::{Bot, KnowledgeBase};

/// Description used when a bot has none.
pub const DEFAULT_DESCRIPTION: &str = "a helpful AI assistant";

/// Closing instruction shared by every synthesized prompt.
pub const TONE_INSTRUCTION: &str = "Be friendly, helpful, and concise.";

/// Knowledge-base entries quoted in the templated prompt.
pub const KNOWLEDGE_EXCERPT_ENTRIES: usize = 10;

/// Longest knowledge-base value quoted, in characters.
pub const KNOWLEDGE_VALUE_CHARS: usize = 500;

/// `"You are {name}, {description}. Be friendly, helpful, and concise."`
pub fn default_system_prompt(bot: &Bot) -> String {
    format!("{}. {TONE_INSTRUCTION}", identity_line(bot))
}

/// Prompt for the streaming variant: stored training text wins over the default.
pub fn system_prompt(bot: &Bot) -> String {
    match bot.training_text() {
        Some(training) => training.to_string(),
        None => default_system_prompt(bot),
    }
}

/// Prompt for the non-streaming variant.
///
/// Layout: identity line, optional training text, template role and
/// capability bullets, knowledge-base excerpt, tone instruction.
pub fn templated_system_prompt(bot: &Bot) -> String {
    let mut prompt = format!("{}.\n\n", identity_line(bot));

    if let Some(training) = bot.training_text() {
        prompt.push_str(training);
        prompt.push_str("\n\n");
    }

    let _ = writeln!(prompt, "Your role: {}.", bot.template.title());
    prompt.push_str("You can help with:\n");
    for capability in bot.template.capabilities() {
        let _ = writeln!(prompt, "- {capability}");
    }

    if !bot.knowledge_base.is_empty() {
        prompt.push_str("\nReference information (use it when relevant, never invent facts beyond it):\n");
        prompt.push_str(&knowledge_excerpt(&bot.knowledge_base));
    }

    let _ = write!(
        prompt,
        "\n{TONE_INSTRUCTION} Keep replies short enough to read comfortably in a chat window."
    );
    prompt
}

/// Bulleted `key: value` lines for the first entries of a knowledge base.
pub fn knowledge_excerpt(knowledge_base: &KnowledgeBase) -> String {
    let mut excerpt = String::new();
    for (key, value) in knowledge_base.entries.iter().take(KNOWLEDGE_EXCERPT_ENTRIES) {
        let _ = writeln!(excerpt, "- {key}: {}", truncate_chars(value.trim(), KNOWLEDGE_VALUE_CHARS));
    }
    excerpt
}

fn identity_line(bot: &Bot) -> String {
    let description = bot
        .description_text()
        .map(|d| d.strip_suffix('.').unwrap_or(d))
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);
    format!("You are {}, {description}", bot.name)
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botforge_types::bot::{BotId, BotTemplate};

    fn ada() -> Bot {
        Bot {
            id: BotId::new(),
            name: "Ada".to_string(),
            description: None,
            training_data: None,
            template: BotTemplate::General,
            knowledge_base: KnowledgeBase::default(),
        }
    }

    #[test]
    fn test_default_prompt_without_description() {
        assert_eq!(
            default_system_prompt(&ada()),
            "You are Ada, a helpful AI assistant. Be friendly, helpful, and concise."
        );
    }

    #[test]
    fn test_default_prompt_with_description() {
        let bot = Bot {
            description: Some("the support bot for Acme Inc.".to_string()),
            ..ada()
        };
        assert_eq!(
            default_system_prompt(&bot),
            "You are Ada, the support bot for Acme Inc. Be friendly, helpful, and concise."
        );
    }

    #[test]
    fn test_description_ellipsis_kept() {
        let bot = Bot {
            description: Some("Wait for it...".to_string()),
            ..ada()
        };
        assert_eq!(
            default_system_prompt(&bot),
            "You are Ada, Wait for it... Be friendly, helpful, and concise."
        );
    }

    #[test]
    fn test_blank_description_uses_default() {
        let bot = Bot {
            description: Some("  ".to_string()),
            ..ada()
        };
        assert!(default_system_prompt(&bot).contains(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn test_training_text_overrides_default() {
        let bot = Bot {
            training_data: Some("  You only talk about tea.  ".to_string()),
            ..ada()
        };
        assert_eq!(system_prompt(&bot), "You only talk about tea.");
    }

    #[test]
    fn test_blank_training_text_falls_back() {
        let bot = Bot {
            training_data: Some("\n".to_string()),
            ..ada()
        };
        assert_eq!(system_prompt(&bot), default_system_prompt(&bot));
    }

    #[test]
    fn test_templated_prompt_lists_capabilities() {
        let bot = Bot {
            template: BotTemplate::CustomerSupport,
            ..ada()
        };
        let prompt = templated_system_prompt(&bot);
        assert!(prompt.starts_with("You are Ada, a helpful AI assistant.\n\n"));
        assert!(prompt.contains("Your role: Customer Support Agent."));
        for capability in BotTemplate::CustomerSupport.capabilities() {
            assert!(prompt.contains(&format!("- {capability}\n")));
        }
        assert!(!prompt.contains("Reference information"));
        assert!(prompt.contains(TONE_INSTRUCTION));
    }

    #[test]
    fn test_templated_prompt_includes_training_and_knowledge() {
        let bot = Bot {
            training_data: Some("Always greet in French.".to_string()),
            knowledge_base: KnowledgeBase {
                entries: vec![("hours".to_string(), "9am-5pm".to_string())],
            },
            ..ada()
        };
        let prompt = templated_system_prompt(&bot);
        assert!(prompt.contains("Always greet in French.\n\n"));
        assert!(prompt.contains("- hours: 9am-5pm\n"));
    }

    #[test]
    fn test_knowledge_excerpt_is_bounded() {
        let entries = (0..15)
            .map(|i| (format!("k{i:02}"), "x".repeat(KNOWLEDGE_VALUE_CHARS + 20)))
            .collect();
        let excerpt = knowledge_excerpt(&KnowledgeBase { entries });
        let lines: Vec<&str> = excerpt.lines().collect();
        assert_eq!(lines.len(), KNOWLEDGE_EXCERPT_ENTRIES);
        assert!(lines[0].starts_with("- k00: "));
        assert!(lines[0].ends_with('…'));
        assert_eq!(
            lines[0].chars().count(),
            "- k00: ".len() + KNOWLEDGE_VALUE_CHARS + 1
        );
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé…");
        assert_eq!(truncate_chars("hi", 2), "hi");
    }
}
