//! Code check (`spec.md` §4.7): extract fenced code blocks and flag
//! unbalanced delimiters. Sandboxed execution is out of scope for this
//! workspace (see `DESIGN.md`), so this is a syntax-only check.

use std::sync::OnceLock;

use hive_core::{IssueKind, VerificationIssue};
use regex::Regex;

fn fence_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w*)\n(.*?)```").expect("valid code fence pattern"))
}

/// Extract every fenced code block in `answer` and flag unbalanced
/// brace/paren/bracket/quote nesting. Confidence: 0.8 if no code block
/// was found to check, else 0.9 if every block balanced, 0.5 if any
/// didn't.
#[must_use]
pub fn verify_code(answer: &str) -> (Vec<VerificationIssue>, f64) {
    let mut issues = Vec::new();
    let mut found_block = false;

    for captures in fence_pattern().captures_iter(answer) {
        found_block = true;
        let body = &captures[2];
        if let Some(message) = find_unbalanced(body) {
            issues.push(VerificationIssue::new(IssueKind::CodeError, message, 2));
        }
    }

    let confidence = if !found_block {
        0.8
    } else if issues.is_empty() {
        0.9
    } else {
        0.5
    };
    (issues, confidence)
}

fn find_unbalanced(body: &str) -> Option<String> {
    let mut stack = Vec::new();
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for c in body.chars() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => in_string = Some(c),
            '(' | '[' | '{' => stack.push(c),
            ')' => {
                if stack.pop() != Some('(') {
                    return Some("unbalanced ')'".to_owned());
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return Some("unbalanced ']'".to_owned());
                }
            }
            '}' => {
                if stack.pop() != Some('{') {
                    return Some("unbalanced '}'".to_owned());
                }
            }
            _ => {}
        }
    }

    if in_string.is_some() {
        return Some("unterminated string literal".to_owned());
    }
    if let Some(unclosed) = stack.pop() {
        return Some(format!("unclosed '{unclosed}'"));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_code_has_no_issues() {
        let answer = "```python\ndef f(x):\n    return (x + 1)\n```";
        let (issues, confidence) = verify_code(answer);
        assert!(issues.is_empty());
        assert!((confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn unclosed_paren_is_flagged() {
        let answer = "```python\ndef f(x:\n    return x\n```";
        let (issues, confidence) = verify_code(answer);
        assert_eq!(issues.len(), 1);
        assert!((confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn unterminated_string_is_flagged() {
        let answer = "```js\nconsole.log(\"hello);\n```";
        let (issues, confidence) = verify_code(answer);
        assert_eq!(issues.len(), 1);
        assert!((confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn prose_with_no_fences_has_no_issues() {
        let (issues, confidence) = verify_code("just an explanation, no code here");
        assert!(issues.is_empty());
        assert!((confidence - 0.8).abs() < 1e-9);
    }
}
