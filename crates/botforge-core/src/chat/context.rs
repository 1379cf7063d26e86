//! Message list assembly for a completion call.

use botforge_types::conversation::Turn;
use botforge_types::llm::Message;

/// The last `limit` turns of `history`, or all of it when `limit` is `None`.
pub fn recent_turns(history: &[Turn], limit: Option<usize>) -> &[Turn] {
    match limit {
        Some(limit) if history.len() > limit => &history[history.len() - limit..],
        _ => history,
    }
}

/// Build `[system, turn_1 .. turn_n, user]`.
///
/// Stored turns keep their role and relative order; the new user message
/// is always last.
pub fn assemble_messages(
    system_prompt: &str,
    history: &[Turn],
    user_message: &str,
    history_limit: Option<usize>,
) -> Vec<Message> {
    let turns = recent_turns(history, history_limit);

    let mut messages = Vec::with_capacity(turns.len() + 2);
    messages.push(Message::system(system_prompt));
    messages.extend(turns.iter().map(Message::from));
    messages.push(Message::user(user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use botforge_types::llm::MessageRole;

    fn history(n: usize) -> Vec<Turn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("q{i}"))
                } else {
                    Turn::assistant(format!("a{i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_no_history_yields_two_messages() {
        let messages = assemble_messages("sys", &[], "Hello", None);
        assert_eq!(
            messages,
            vec![Message::system("sys"), Message::user("Hello")]
        );
    }

    #[test]
    fn test_full_history_in_order() {
        let turns = history(5);
        let messages = assemble_messages("sys", &turns, "next", None);
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0].role, MessageRole::System);
        for (i, turn) in turns.iter().enumerate() {
            assert_eq!(messages[i + 1], Message::from(turn));
        }
        assert_eq!(messages[6], Message::user("next"));
    }

    #[test]
    fn test_history_limit_keeps_most_recent() {
        let turns = history(14);
        let messages = assemble_messages("sys", &turns, "next", Some(10));
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[1].content, "q4");
        assert_eq!(messages[10].content, "a13");
    }

    #[test]
    fn test_history_limit_larger_than_history() {
        let turns = history(3);
        assert_eq!(recent_turns(&turns, Some(10)).len(), 3);
        assert_eq!(recent_turns(&turns, Some(0)).len(), 0);
    }

    #[test]
    fn test_stored_system_turns_are_forwarded() {
        let turns = vec![Turn {
            role: botforge_types::conversation::TurnRole::System,
            content: "earlier instruction".to_string(),
        }];
        let messages = assemble_messages("sys", &turns, "hi", None);
        assert_eq!(messages[1].role, MessageRole::System);
        assert_eq!(messages[1].content, "earlier instruction");
    }
}
