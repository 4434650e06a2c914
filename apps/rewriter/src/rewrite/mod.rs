// Content Rewriter: pure string-to-string stages, no I/O.
// Order: font substitution first, then each handler block in HANDLER_BLOCKS order.

pub mod blocks;
pub mod fonts;
pub mod insertion;

use tracing::info;

use crate::errors::RewriteError;

pub use fonts::FontRewriter;
pub use insertion::{InsertMode, InsertOutcome, InsertionRule};

/// Handler blocks, in insertion order. Both land before the stat anchor, contact handler first.
pub const HANDLER_BLOCKS: &[InsertionRule] = &[
    InsertionRule {
        name: "contact-buttons",
        anchor: blocks::STAT_ANCHOR,
        block: blocks::CONTACT_BUTTONS_HANDLER,
        mode: InsertMode::FirstOccurrence,
    },
    InsertionRule {
        name: "form-handler",
        anchor: blocks::STAT_ANCHOR,
        block: blocks::FORM_HANDLER,
        mode: InsertMode::FirstOccurrence,
    },
];

/// Result of the full pipeline.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub text: String,
    pub insertions: Vec<(&'static str, InsertOutcome)>,
}

/// The complete Inter migration: fonts, then handler blocks.
#[derive(Debug)]
pub struct Rewriter {
    fonts: FontRewriter,
    insertions: Vec<InsertionRule>,
}

impl Rewriter {
    pub fn standard() -> Result<Self, RewriteError> {
        Ok(Self::new(FontRewriter::standard()?, HANDLER_BLOCKS.to_vec()))
    }

    pub fn new(fonts: FontRewriter, insertions: Vec<InsertionRule>) -> Self {
        Rewriter { fonts, insertions }
    }

    pub fn replace_fonts(&self, content: &str) -> String {
        info!("Replacing fonts with Inter...");
        self.fonts.replace_fonts(content)
    }

    pub fn add_handler_blocks(&self, content: &str) -> Rewritten {
        let mut text = content.to_string();
        let mut insertions = Vec::with_capacity(self.insertions.len());

        for (i, rule) in self.insertions.iter().enumerate() {
            info!("Adding {} block...", rule.name);
            let (next, outcome) = rule.apply_stacked(&text, &self.stacked_after(i));
            text = next;
            insertions.push((rule.name, outcome));
        }

        Rewritten { text, insertions }
    }

    /// Payloads that later rules on the same anchor place between rule `index` and the anchor.
    fn stacked_after(&self, index: usize) -> String {
        let anchor = self.insertions[index].anchor;
        self.insertions[index + 1..]
            .iter()
            .filter(|rule| rule.anchor == anchor)
            .map(InsertionRule::payload)
            .collect()
    }

    /// Runs every stage. Total: always yields a document, whatever matched.
    pub fn transform(&self, content: &str) -> Rewritten {
        let text = self.replace_fonts(content);
        self.add_handler_blocks(&text)
    }
}
