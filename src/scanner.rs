//! Line scanner and doc-comment tracker.

/// One physical source line split at its first `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 0-based.
    pub number: usize,
    /// Instruction text before the comment, trimmed.
    pub code: &'a str,
    pub comment: Option<&'a str>,
    /// Nothing but whitespace on the line.
    pub blank: bool,
}

pub fn scan(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source.lines().enumerate().map(|(number, raw)| {
        let (code, comment) = match raw.find(';') {
            Some(i) => (&raw[..i], Some(comment_text(&raw[i + 1..]))),
            None => (raw, None),
        };
        SourceLine {
            number,
            code: code.trim(),
            comment,
            blank: raw.trim().is_empty(),
        }
    })
}

/// Drops one leading whitespace character when it is directly followed by
/// text (`; note` -> `note`).
fn comment_text(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_whitespace() && !b.is_whitespace() => &raw[a.len_utf8()..],
        _ => raw,
    }
}

/// Buffers comment lines until they are attached to a label or discarded.
#[derive(Debug, Default)]
pub struct CommentTracker {
    pending: Vec<String>,
}

impl CommentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, comment: &str) {
        self.pending.push(comment.to_string());
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_code_and_comment() {
        let lines: Vec<_> = scan("  JUMP lx ; go\n;  two spaces\n\n;x").collect();
        assert_eq!(lines[0].code, "JUMP lx");
        assert_eq!(lines[0].comment, Some("go"));
        assert_eq!(lines[1].code, "");
        assert_eq!(lines[1].comment, Some("  two spaces"));
        assert!(!lines[1].blank);
        assert!(lines[2].blank);
        assert_eq!(lines[3].comment, Some("x"));
        assert_eq!(lines[3].number, 3);
    }

    #[test]
    fn crlf_is_tolerated() {
        let lines: Vec<_> = scan("EXIT ; bye\r\nNOPE\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].comment, Some("bye"));
        assert_eq!(lines[1].code, "NOPE");
    }
}
