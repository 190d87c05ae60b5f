//! Submission types for the chat loop.
//!
//! A line of user input is either a question for Wingman or one of a few
//! slash commands that act on the local transcript.

/// Parses user input into Submission types.
pub struct SubmissionParser;

impl SubmissionParser {
    /// Parse message content into a Submission.
    pub fn parse(content: &str) -> Submission {
        let trimmed = content.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "/clear" => Submission::Clear,
            "/history" => Submission::History,
            "/help" | "/?" => Submission::Help,
            "/quit" | "/exit" => Submission::Quit,
            _ => Submission::UserInput {
                content: trimmed.to_string(),
            },
        }
    }
}

/// One unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A question for Wingman.
    UserInput { content: String },
    /// Drop the transcript.
    Clear,
    /// Print the transcript.
    History,
    /// List the available commands.
    Help,
    /// Stop the loop.
    Quit,
}

/// Help text for the slash commands.
pub const HELP_TEXT: &str = "\
Ask Wingman anything about flight training, regulations, weather or planning.
Commands:
  /history  show this conversation
  /clear    start a fresh conversation
  /help     show this help
  /quit     exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_user_input() {
        let submission = SubmissionParser::parse("  Hello, how are you?  ");
        assert_eq!(
            submission,
            Submission::UserInput {
                content: "Hello, how are you?".to_string()
            }
        );
    }

    #[test]
    fn test_parser_commands_case_insensitive() {
        assert_eq!(SubmissionParser::parse("/CLEAR"), Submission::Clear);
        assert_eq!(SubmissionParser::parse("/history"), Submission::History);
        assert_eq!(SubmissionParser::parse("/?"), Submission::Help);
        assert_eq!(SubmissionParser::parse("/Exit"), Submission::Quit);
    }

    #[test]
    fn test_parser_unknown_slash_is_user_input() {
        assert!(matches!(
            SubmissionParser::parse("/atis"),
            Submission::UserInput { content } if content == "/atis"
        ));
    }
}
