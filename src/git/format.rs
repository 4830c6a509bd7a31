/// Log format used when none is given: full message, then a `-hash-` field
pub const DEFAULT_FORMAT: &str = "%B%n-hash-%n%H";

/// The commit attributes a log format can reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub message: &'a str,
    pub hash: &'a str,
    pub author_name: &'a str,
    pub author_email: &'a str,
}

impl LogEntry<'_> {
    fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(self.hash)
    }
}

/// Render a commit with a git-log style format.
///
/// Supported placeholders: `%B` raw message, `%s` subject, `%H` hash,
/// `%h` abbreviated hash, `%an` author name, `%ae` author email,
/// `%n` newline and `%%`. Anything else is copied through.
pub fn format_entry(format: &str, entry: &LogEntry<'_>) -> String {
    let mut out = String::with_capacity(format.len() + entry.message.len() + 40);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('B') => out.push_str(entry.message),
            Some('s') => out.push_str(entry.subject()),
            Some('H') => out.push_str(entry.hash),
            Some('h') => out.push_str(entry.short_hash()),
            Some('n') => out.push('\n'),
            Some('%') => out.push('%'),
            Some('a') => match chars.next() {
                Some('n') => out.push_str(entry.author_name),
                Some('e') => out.push_str(entry.author_email),
                Some(other) => {
                    out.push_str("%a");
                    out.push(other);
                }
                None => out.push_str("%a"),
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }

    out
}
