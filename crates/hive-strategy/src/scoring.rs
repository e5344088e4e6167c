//! Self-rating extraction shared by `tree_of_thoughts` and `best_of_N`
//! (`spec.md` §4.3: "generate ... a self-rated score 1-10").

/// Extract a 1-10 self-rating from free text. Prefers a number following
/// the word "score"; falls back to the first number anywhere in the
/// text, then to the midpoint default.
#[must_use]
pub(crate) fn extract_score(text: &str) -> u8 {
    let lower = text.to_lowercase();
    if let Some(pos) = lower.rfind("score") {
        if let Some(score) = first_number_from(&text[pos..]) {
            return score.clamp(1, 10);
        }
    }
    first_number_from(text).map_or(5, |score| score.clamp(1, 10))
}

fn first_number_from(text: &str) -> Option<u8> {
    let mut digits = String::new();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            if digits.len() == 2 {
                break;
            }
        } else if !digits.is_empty() {
            break;
        }
    }
    digits.parse::<u8>().ok()
}
