use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::session::Transcript;

/// "Score final : 7/10", any case, optional spacing
static LABELLED_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)score\s*final\s*:\s*([0-9]+)\s*/\s*([0-9]+)").unwrap());

/// "8/10 (" as in "8/10 (80%)"
static BARE_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*/\s*([0-9]+)\s*\(").unwrap());

/// Quiz result announced by the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
    pub percentage: u8,
}

impl Score {
    /// Build a score; `None` when `total` is zero
    pub fn new(correct: u32, total: u32) -> Option<Self> {
        if total == 0 {
            return None;
        }
        // round half up, same as the web client's Math.round
        let pct = (200 * u64::from(correct) + u64::from(total)) / (2 * u64::from(total));
        Some(Self {
            correct,
            total,
            percentage: pct.min(100) as u8,
        })
    }
}

/// Extract a final score from assistant text
///
/// The labelled form wins whenever it appears; otherwise the first bare
/// "c/t (" match is used. Zero totals and numbers that do not fit a `u32`
/// count as no score.
pub fn detect(text: &str) -> Option<Score> {
    let captures = LABELLED_SCORE
        .captures(text)
        .or_else(|| BARE_SCORE.captures(text))?;

    let correct = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let total = captures.get(2)?.as_str().parse::<u32>().ok()?;
    Score::new(correct, total)
}

/// Run [`detect`] on the latest turn, only if the assistant wrote it
pub fn detect_completion(transcript: &Transcript) -> Option<Score> {
    transcript
        .last_assistant_turn()
        .and_then(|turn| detect(&turn.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Turn;
    use pretty_assertions::assert_eq;

    fn score(correct: u32, total: u32, percentage: u8) -> Option<Score> {
        Some(Score {
            correct,
            total,
            percentage,
        })
    }

    #[test]
    fn test_labelled_form() {
        assert_eq!(detect("Bravo ! Score final : 7/10"), score(7, 10, 70));
        assert_eq!(detect("SCORE FINAL:7 / 10."), score(7, 10, 70));
        assert_eq!(detect("score   final :  3/4"), score(3, 4, 75));
    }

    #[test]
    fn test_bare_form() {
        assert_eq!(detect("Vous avez obtenu 8/10 (80%)."), score(8, 10, 80));
        assert_eq!(detect("Résultat 8 / 10 (bien)"), score(8, 10, 80));
    }

    #[test]
    fn test_bare_form_needs_parenthesis() {
        assert_eq!(detect("Question 3/10 : que fait malloc ?"), None);
    }

    #[test]
    fn test_labelled_form_wins() {
        assert_eq!(detect("Score final : 5/8 (62%)"), score(5, 8, 63));
        // even when a bare score appears earlier in the text
        assert_eq!(
            detect("Partie 1 : 2/4 (50%). Score final : 6/10"),
            score(6, 10, 60)
        );
    }

    #[test]
    fn test_zero_total_is_no_score() {
        assert_eq!(detect("Score final : 0/0"), None);
        assert_eq!(detect("0/0 (0%)"), None);
    }

    #[test]
    fn test_oversized_numbers_are_no_score() {
        assert_eq!(detect("Score final : 99999999999999999999/10"), None);
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(detect("Score final : ７/１０. Bilan 7/10 (70%)"), score(7, 10, 70));
        assert_eq!(detect("Score final : ７/１０"), None);
    }

    #[test]
    fn test_no_pattern() {
        assert_eq!(detect("Question 1 : quelle est la taille d'un int ?"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(Score::new(5, 8).unwrap().percentage, 63);
        assert_eq!(Score::new(1, 3).unwrap().percentage, 33);
        assert_eq!(Score::new(2, 3).unwrap().percentage, 67);
        assert_eq!(Score::new(0, 5).unwrap().percentage, 0);
        assert_eq!(Score::new(10, 10).unwrap().percentage, 100);
    }

    #[test]
    fn test_percentage_is_capped() {
        assert_eq!(Score::new(12, 10).unwrap().percentage, 100);
        assert_eq!(Score::new(u32::MAX, 1).unwrap().percentage, 100);
    }

    #[test]
    fn test_only_latest_assistant_turn_counts() {
        let earlier_score = Transcript::from(vec![
            Turn::assistant("Score final : 9/10"),
            Turn::user("Je veux recommencer"),
            Turn::assistant("Question 1 : ..."),
        ]);
        assert_eq!(detect_completion(&earlier_score), None);

        let trailing_user = Transcript::from(vec![
            Turn::assistant("Score final : 9/10"),
            Turn::user("merci"),
        ]);
        assert_eq!(detect_completion(&trailing_user), None);

        let finished = Transcript::from(vec![
            Turn::user("B"),
            Turn::assistant("Bonne réponse. Score final : 9/10 (90%)"),
        ]);
        assert_eq!(detect_completion(&finished), score(9, 10, 90));
    }
}
