use reedline::{Completer, Span, Suggestion};

const COMMANDS: &[(&str, &str)] = &[
    ("search", "filter records by text"),
    ("clear", "remove the search filter"),
    ("next", "next page"),
    ("prev", "previous page"),
    ("select", "check rows on this page"),
    ("deselect", "uncheck rows on this page"),
    ("selected", "list the selection"),
    ("action", "run the row action"),
    ("sort", "sort by a field"),
    ("reload", "fetch records again"),
    ("export", "write the selection to CSV"),
    ("\\help", "show help"),
    ("\\logs", "show recent log entries"),
    ("\\clear", "clear the screen"),
    ("quit", "exit"),
];

/// Completes the command word at the start of the line
pub struct CommandCompleter;

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let input = &line[..pos];
        if input.contains(char::is_whitespace) {
            return Vec::new();
        }

        COMMANDS
            .iter()
            .filter(|(name, _)| name.starts_with(input))
            .map(|(name, description)| Suggestion {
                value: name.to_string(),
                description: Some(description.to_string()),
                extra: None,
                span: Span { start: 0, end: pos },
                style: None,
                append_whitespace: true,
            })
            .collect()
    }
}
