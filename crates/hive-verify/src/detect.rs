//! Auto-detect which checks a (query, answer) pair needs (`spec.md`
//! §4.7). `Format` always runs; the rest scan for pattern/keyword
//! signals in the combined text.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::CheckKind;

fn math_patterns() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"\d+\s*[+\-*/×÷]\s*\d+").expect("valid math operator pattern"),
            Regex::new(r"=\s*\d+").expect("valid math equals pattern"),
        ]
    })
}

const MATH_KEYWORDS: [&str; 10] =
    ["calculate", "compute", "sum", "product", "average", "mean", "equation", "formula", "integral", "derivative"];

const CODE_KEYWORDS: [&str; 7] = ["def ", "function ", "class ", "import ", "return", "print", "console.log"];

fn factual_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(in \d{4}|founded|born|died|discovered|according to|statistics show)\b")
            .expect("valid factual pattern")
    })
}

pub(crate) fn logic_patterns() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"both .+ and not .+").expect("valid logic pattern"),
            Regex::new(r"always .+ but sometimes").expect("valid logic pattern"),
            Regex::new(r"impossible .+ but .+ can").expect("valid logic pattern"),
        ]
    })
}

/// Which checks apply to this (query, answer) pair. `Format` is always
/// included last.
#[must_use]
pub fn needed_checks(query: &str, answer: &str) -> Vec<CheckKind> {
    let combined = format!("{query} {answer}").to_lowercase();
    let mut checks = Vec::new();

    if math_patterns().iter().any(|p| p.is_match(&combined)) || MATH_KEYWORDS.iter().any(|k| combined.contains(k)) {
        checks.push(CheckKind::Math);
    }
    if answer.contains("```") || CODE_KEYWORDS.iter().any(|k| answer.contains(k)) {
        checks.push(CheckKind::Code);
    }
    if factual_pattern().is_match(&combined) {
        checks.push(CheckKind::Factual);
    }
    if logic_patterns().iter().any(|p| p.is_match(&combined)) {
        checks.push(CheckKind::Logic);
    }
    checks.push(CheckKind::Format);

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_math_from_operator_pattern() {
        let checks = needed_checks("what is 2+2?", "the answer is 4");
        assert!(checks.contains(&CheckKind::Math));
    }

    #[test]
    fn detects_math_from_keyword() {
        let checks = needed_checks("please calculate the total", "the total is fourteen");
        assert!(checks.contains(&CheckKind::Math));
    }

    #[test]
    fn detects_code_from_fence() {
        let checks = needed_checks("write a function", "```python\ndef f(): pass\n```");
        assert!(checks.contains(&CheckKind::Code));
    }

    #[test]
    fn detects_factual_claims() {
        let checks = needed_checks("when was it founded?", "the company was founded in 1999");
        assert!(checks.contains(&CheckKind::Factual));
    }

    #[test]
    fn detects_logic_contradictions() {
        let checks = needed_checks("q", "it is both true and not true at once");
        assert!(checks.contains(&CheckKind::Logic));
    }

    #[test]
    fn format_is_always_included() {
        let checks = needed_checks("hi", "hello");
        assert!(checks.contains(&CheckKind::Format));
    }

    #[test]
    fn plain_prose_only_needs_format() {
        let checks = needed_checks("how are you?", "I am doing well today.");
        assert_eq!(checks, vec![CheckKind::Format]);
    }
}
