//! Intent classification: ordered keyword rules over normalized text.
//!
//! The rule table is evaluated top to bottom and the first hit wins; the
//! order is a precedence policy, not an optimization. A query containing
//! both "hi" and "help" is a greeting because the greeting rule sits
//! above the help rule. Reordering the table changes behavior for
//! ambiguous inputs, so treat the order as part of the contract.

use serde::{Deserialize, Serialize};

/// The classified purpose of a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    Greeting,
    Help,
    LowStock,
    Expiry,
    SalesToday,
    Inventory,
    /// Default when no rule matches: treat the text as a medicine name
    /// or batch number to look up.
    MedicineLookup,
}

/// One classification rule.
///
/// `tokens` match whole whitespace-separated words of the normalized text;
/// `phrases` match as plain substrings. A rule fires when either list hits.
///
/// Token matching for the single-word greetings is a deliberate tightening
/// over bare substring containment: "hi" inside "thiamine" must not turn a
/// medicine lookup into a greeting. Every phrase rule is still plain
/// containment.
struct IntentRule {
    intent: QueryIntent,
    tokens: &'static [&'static str],
    phrases: &'static [&'static str],
}

impl IntentRule {
    fn matches(&self, normalized: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| normalized.split_whitespace().any(|word| word == *t))
            || self.phrases.iter().any(|p| normalized.contains(p))
    }
}

/// Ordered rule table. First match wins; `MedicineLookup` is the fallback
/// and never appears here.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: QueryIntent::Greeting,
        tokens: &["hi", "hey", "hello", "habari", "jambo"],
        phrases: &["good morning", "good afternoon", "good evening"],
    },
    IntentRule {
        intent: QueryIntent::Help,
        tokens: &[],
        phrases: &["help"],
    },
    IntentRule {
        intent: QueryIntent::LowStock,
        tokens: &[],
        phrases: &["low stock", "low on stock", "running low", "out of stock", "restock"],
    },
    IntentRule {
        intent: QueryIntent::Expiry,
        tokens: &[],
        // Covers "expire", "expired", "expiry", "expiring".
        phrases: &["expir"],
    },
    IntentRule {
        intent: QueryIntent::SalesToday,
        tokens: &[],
        phrases: &["sales today", "todays sales", "today sales", "total sales", "sales total"],
    },
    IntentRule {
        intent: QueryIntent::Inventory,
        tokens: &["inventory"],
        phrases: &["all medicines", "list medicines", "medicine list", "stock list"],
    },
];

/// Lowercase the text and strip everything that is not `a-z`, `0-9` or a
/// space. Guards against punctuation from typed input and speech
/// transcripts; "covid-19" and "covid19" intentionally normalize the same.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

/// Classify a raw query. Pure; no store access.
pub fn classify(query: &str) -> QueryIntent {
    let normalized = normalize(query);
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.intent)
        .unwrap_or(QueryIntent::MedicineLookup)
}
