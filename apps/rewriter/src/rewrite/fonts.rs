//! Font substitution: rewrites every Manrope / TTHovesPro reference to Inter.
//!
//! CRITICAL: rule order is load-bearing. Patterns carrying a fallback list or a CSS variable
//! name run before the bare `font-family: 'X'` rule, otherwise the bare rule consumes the
//! prefix and leaves the fallback list with its original spacing.

use regex::{NoExpand, Regex, RegexBuilder};
use tracing::debug;

use crate::errors::RewriteError;

/// How a rule locates its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontPattern {
    /// Exact substring, matched byte-for-byte.
    Literal(&'static str),
    /// Regular expression.
    Regex(&'static str),
}

/// A single find/replace rule over the whole document.
#[derive(Debug, Clone, Copy)]
pub struct FontRule {
    pub name: &'static str,
    pub pattern: FontPattern,
    /// Inserted verbatim; `$` has no special meaning.
    pub replacement: &'static str,
    pub case_insensitive: bool,
}

/// The standard Inter migration, most-constrained pattern first.
pub const STANDARD_FONT_RULES: &[FontRule] = &[
    FontRule {
        name: "cdn-query",
        pattern: FontPattern::Regex(r"family=Manrope:wght@[^&]+&subset=[^&]+"),
        replacement: "family=Inter:wght@300;400;500;600;700",
        case_insensitive: false,
    },
    FontRule {
        name: "headline-font-var",
        pattern: FontPattern::Regex(r"--t-headline-font:\s*'Manrope',\s*Arial,\s*sans-serif"),
        replacement: "--t-headline-font:'Inter',Arial,sans-serif",
        case_insensitive: false,
    },
    FontRule {
        name: "text-font-var",
        pattern: FontPattern::Regex(r"--t-text-font:\s*'Manrope',\s*Arial,\s*sans-serif"),
        replacement: "--t-text-font:'Inter',Arial,sans-serif",
        case_insensitive: false,
    },
    FontRule {
        name: "manrope-with-fallback",
        pattern: FontPattern::Regex(r"font-family:\s*'Manrope',\s*Arial,\s*sans-serif"),
        replacement: "font-family:'Inter',Arial,sans-serif",
        case_insensitive: true,
    },
    FontRule {
        name: "hoves-with-fallback",
        pattern: FontPattern::Regex(r"font-family:\s*'TTHovesPro',\s*Arial,\s*sans-serif"),
        replacement: "font-family:'Inter',Arial,sans-serif",
        case_insensitive: true,
    },
    FontRule {
        name: "field-font-attr",
        pattern: FontPattern::Literal(r#"data-field-fieldfontfamily-value="TTHovesPro""#),
        replacement: r#"data-field-fieldfontfamily-value="Inter""#,
        case_insensitive: false,
    },
    FontRule {
        name: "button-font-attr",
        pattern: FontPattern::Literal(r#"data-field-buttonfontfamily-value="TTHovesPro""#),
        replacement: r#"data-field-buttonfontfamily-value="Inter""#,
        case_insensitive: false,
    },
    FontRule {
        name: "input-font-attr",
        pattern: FontPattern::Literal(r#"data-field-inputfontfamily-value="TTHovesPro""#),
        replacement: r#"data-field-inputfontfamily-value="Inter""#,
        case_insensitive: false,
    },
    FontRule {
        name: "hoves-bare",
        pattern: FontPattern::Regex(r"font-family:\s*'TTHovesPro'"),
        replacement: "font-family:'Inter'",
        case_insensitive: false,
    },
];

#[derive(Debug)]
struct CompiledRule {
    name: &'static str,
    regex: Regex,
    replacement: &'static str,
}

/// An ordered, compiled set of font rules.
#[derive(Debug)]
pub struct FontRewriter {
    rules: Vec<CompiledRule>,
}

impl FontRewriter {
    pub fn standard() -> Result<Self, RewriteError> {
        Self::from_rules(STANDARD_FONT_RULES)
    }

    /// Compiles `rules`, keeping their order.
    pub fn from_rules(rules: &[FontRule]) -> Result<Self, RewriteError> {
        let rules = rules
            .iter()
            .map(|rule| {
                let source = match rule.pattern {
                    FontPattern::Literal(text) => regex::escape(text),
                    FontPattern::Regex(pattern) => pattern.to_string(),
                };
                let regex = RegexBuilder::new(&source)
                    .case_insensitive(rule.case_insensitive)
                    .build()?;
                Ok(CompiledRule {
                    name: rule.name,
                    regex,
                    replacement: rule.replacement,
                })
            })
            .collect::<Result<Vec<_>, RewriteError>>()?;

        Ok(FontRewriter { rules })
    }

    /// Applies every rule in sequence. Total: a rule with no matches leaves the text as is.
    pub fn replace_fonts(&self, content: &str) -> String {
        let mut text = content.to_string();

        for rule in &self.rules {
            let count = rule.regex.find_iter(&text).count();
            if count == 0 {
                debug!("{}: no matches", rule.name);
                continue;
            }
            text = rule
                .regex
                .replace_all(&text, NoExpand(rule.replacement))
                .into_owned();
            debug!("{}: replaced {} reference(s)", rule.name, count);
        }

        text
    }
}
