//! Anchored block insertion: prepends a fixed block immediately before a literal anchor.

use tracing::{info, warn};

/// Which anchor occurrences receive the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertMode {
    #[default]
    FirstOccurrence,
    #[allow(dead_code)]
    EveryOccurrence,
}

/// A block of markup inserted before an anchor, followed by a newline.
#[derive(Debug, Clone, Copy)]
pub struct InsertionRule {
    pub name: &'static str,
    pub anchor: &'static str,
    pub block: &'static str,
    pub mode: InsertMode,
}

/// What an insertion did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Block written before this many anchors.
    Inserted(usize),
    /// Block already sits before the first anchor; nothing written.
    AlreadyPresent,
    /// Anchor absent; nothing written.
    AnchorMissing,
}

impl InsertionRule {
    /// The exact text placed before the anchor.
    pub fn payload(&self) -> String {
        format!("{}\n", self.block)
    }

    /// Single rule with nothing stacked after it.
    #[cfg(test)]
    pub fn apply(&self, content: &str) -> (String, InsertOutcome) {
        self.apply_stacked(content, "")
    }

    /// Applies the rule. Never fails: a missing anchor is logged and the text returned as is.
    /// `stacked_after` is the text that later rules on the same anchor place between this
    /// block and the anchor.
    ///
    /// The block counts as present only when the text before the first anchor ends with
    /// `payload + stacked_after`. A copy elsewhere in the document does not count.
    pub fn apply_stacked(&self, content: &str, stacked_after: &str) -> (String, InsertOutcome) {
        let Some(first) = content.find(self.anchor) else {
            warn!(
                "{}: could not find insertion point {:?}; block not inserted",
                self.name, self.anchor
            );
            return (content.to_string(), InsertOutcome::AnchorMissing);
        };

        let payload = self.payload();
        if content[..first].ends_with(&format!("{payload}{stacked_after}")) {
            info!("{}: block already present, skipping", self.name);
            return (content.to_string(), InsertOutcome::AlreadyPresent);
        }

        let (text, count) = match self.mode {
            InsertMode::FirstOccurrence => {
                let mut text = String::with_capacity(content.len() + payload.len());
                text.push_str(&content[..first]);
                text.push_str(&payload);
                text.push_str(&content[first..]);
                (text, 1)
            }
            InsertMode::EveryOccurrence => {
                let count = content.matches(self.anchor).count();
                let text = content.replace(self.anchor, &format!("{payload}{}", self.anchor));
                (text, count)
            }
        };

        info!("{}: inserted before {} anchor(s)", self.name, count);
        (text, InsertOutcome::Inserted(count))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    const ANCHOR: &str = "<!-- Stat -->";

    fn rule(mode: InsertMode) -> InsertionRule {
        InsertionRule {
            name: "test-block",
            anchor: ANCHOR,
            block: "<script>init();</script>",
            mode,
        }
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_inserts_immediately_before_anchor() {
        let input = "<body>\n<!-- Stat -->\n</body>";
        let (out, outcome) = rule(InsertMode::FirstOccurrence).apply(input);
        assert_eq!(out, "<body>\n<script>init();</script>\n<!-- Stat -->\n</body>");
        assert_eq!(outcome, InsertOutcome::Inserted(1));
    }

    #[test]
    fn test_anchor_itself_is_unmodified() {
        let (out, _) = rule(InsertMode::default()).apply("x<!-- Stat -->y");
        assert!(out.ends_with("<!-- Stat -->y"));
        assert_eq!(out.matches(ANCHOR).count(), 1);
    }

    #[test]
    fn test_missing_anchor_returns_input_unchanged() {
        let input = "<body><p>no stats here</p></body>";
        let (out, outcome) = rule(InsertMode::FirstOccurrence).apply(input);
        assert_eq!(out, input);
        assert_eq!(outcome, InsertOutcome::AnchorMissing);
    }

    #[test]
    fn test_missing_anchor_logs_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let (_, outcome) = tracing::subscriber::with_default(subscriber, || {
            rule(InsertMode::FirstOccurrence).apply("<body></body>")
        });

        assert_eq!(outcome, InsertOutcome::AnchorMissing);
        let output = logs.contents();
        assert!(output.contains("WARN"), "no warning logged: {output}");
        assert!(output.contains("test-block: could not find insertion point"));
    }

    #[test]
    fn test_first_occurrence_mode_inserts_once() {
        let input = "a<!-- Stat -->b<!-- Stat -->c";
        let (out, outcome) = rule(InsertMode::FirstOccurrence).apply(input);
        assert_eq!(out, "a<script>init();</script>\n<!-- Stat -->b<!-- Stat -->c");
        assert_eq!(outcome, InsertOutcome::Inserted(1));
    }

    #[test]
    fn test_every_occurrence_mode_inserts_before_each() {
        let input = "a<!-- Stat -->b<!-- Stat -->c";
        let (out, outcome) = rule(InsertMode::EveryOccurrence).apply(input);
        assert_eq!(
            out,
            "a<script>init();</script>\n<!-- Stat -->b<script>init();</script>\n<!-- Stat -->c"
        );
        assert_eq!(outcome, InsertOutcome::Inserted(2));
    }

    #[test]
    fn test_second_apply_is_noop() {
        let r = rule(InsertMode::FirstOccurrence);
        let (once, _) = r.apply("<!-- Stat -->");
        let (twice, outcome) = r.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(outcome, InsertOutcome::AlreadyPresent);
    }

    #[test]
    fn test_copy_away_from_anchor_does_not_block_insertion() {
        let input = "<head><script>init();</script></head><body>\n<!-- Stat -->\n</body>";
        let (out, outcome) = rule(InsertMode::FirstOccurrence).apply(input);
        assert_eq!(outcome, InsertOutcome::Inserted(1));
        assert_eq!(
            out,
            "<head><script>init();</script></head><body>\n<script>init();</script>\n<!-- Stat -->\n</body>"
        );
    }

    #[test]
    fn test_copy_not_adjacent_to_anchor_is_reinserted() {
        let input = "<script>init();</script>\n<p>gap</p><!-- Stat -->";
        let (out, outcome) = rule(InsertMode::FirstOccurrence).apply(input);
        assert_eq!(outcome, InsertOutcome::Inserted(1));
        assert!(out.ends_with("<p>gap</p><script>init();</script>\n<!-- Stat -->"));
    }

    #[test]
    fn test_stacked_block_counts_as_present() {
        let r = rule(InsertMode::FirstOccurrence);
        let later = "<style>.x{}</style>\n";
        let input = format!("<script>init();</script>\n{later}<!-- Stat -->");

        let (out, outcome) = r.apply_stacked(&input, later);
        assert_eq!(outcome, InsertOutcome::AlreadyPresent);
        assert_eq!(out, input);

        let (_, outcome) = r.apply(&input);
        assert_eq!(outcome, InsertOutcome::Inserted(1));
    }

    #[test]
    fn test_default_mode_is_first_occurrence() {
        assert_eq!(InsertMode::default(), InsertMode::FirstOccurrence);
    }
}
