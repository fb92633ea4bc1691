//! Literal text substitutions
//!
//! An ordered table of find/replace rules used to shrink the final markup.
//! Patterns target identifier-like tokens and class names chosen not to
//! collide with markup syntax; replacement is raw text, not structure-aware,
//! so the table itself must be conflict-free. The one check the engine
//! enforces is that no two rules share a replacement value, validated when
//! the table is constructed and before any document is touched.

use thiserror::Error;
use tracing::debug;

/// Table construction errors.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate replacement '{replacement}' for patterns '{first}' and '{second}'")]
    DuplicateReplacement {
        replacement: String,
        first: String,
        second: String,
    },
}

/// One literal find/replace rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
}

/// Immutable, validated, ordered substitution table.
///
/// Rules apply longest-pattern-first so a short pattern can never consume a
/// substring that a longer pattern should have matched. Equal-length patterns
/// keep the order they were handed in (stable sort).
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    rules: Vec<Rule>,
}

impl SubstitutionTable {
    /// Build a table from (pattern, replacement) pairs.
    ///
    /// Fails if two pairs share a replacement value.
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Result<Self, TableError> {
        let mut rules: Vec<Rule> = Vec::new();
        for (pattern, replacement) in pairs {
            if let Some(existing) = rules.iter().find(|r| r.replacement == replacement) {
                return Err(TableError::DuplicateReplacement {
                    replacement,
                    first: existing.pattern.clone(),
                    second: pattern,
                });
            }
            rules.push(Rule {
                pattern,
                replacement,
            });
        }
        rules.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        Ok(Self { rules })
    }

    /// Rules in application order (longest pattern first).
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to the input as a global literal replacement.
    pub fn apply(&self, input: &str) -> String {
        let mut text = input.to_string();
        for rule in &self.rules {
            text = text.replace(&rule.pattern, &rule.replacement);
        }
        debug!(
            rules = self.rules.len(),
            before = input.len(),
            after = text.len(),
            "applied substitution table"
        );
        text
    }
}
