//! Query complexity classification (`spec.md` §4.4).

/// Query complexity bucket, used to pick a cascade starting tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
    Reasoning,
}

/// Signals that suggest the query needs deep reasoning; checked first.
const REASONING_SIGNALS: [&str; 14] = [
    "prove",
    "derive",
    "why does",
    "explain step by step",
    "verify",
    "analyze in depth",
    "compare and contrast",
    "evaluate the implications",
    "what are the consequences",
    "how would you approach",
    "critically assess",
    "mathematical proof",
    "formal reasoning",
    "logical deduction",
];

/// Signals that suggest a simple, cheap-to-answer query.
const SIMPLE_SIGNALS: [&str; 12] = [
    "what is",
    "who is",
    "when did",
    "define",
    "list",
    "summarize briefly",
    "translate",
    "format",
    "convert",
    "hello",
    "hi",
    "thanks",
];

/// Classify a query's complexity (`spec.md` §4.4): reasoning signals take
/// priority over simple signals, which take priority over a length-based
/// default.
#[must_use]
pub fn classify(query: &str) -> Complexity {
    let lower = query.to_lowercase();
    if REASONING_SIGNALS.iter().any(|signal| lower.contains(signal)) {
        return Complexity::Reasoning;
    }
    if SIMPLE_SIGNALS.iter().any(|signal| lower.contains(signal)) {
        return Complexity::Simple;
    }
    match query.len() {
        n if n < 100 => Complexity::Simple,
        n if n < 500 => Complexity::Moderate,
        _ => Complexity::Complex,
    }
}

/// Map a classification to the tier the cascade should start at.
#[must_use]
pub const fn starting_tier(complexity: Complexity) -> u8 {
    match complexity {
        Complexity::Simple | Complexity::Moderate => 1,
        Complexity::Complex => 2,
        Complexity::Reasoning => 3,
    }
}
