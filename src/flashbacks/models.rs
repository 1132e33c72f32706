//! Data models for flashbacks

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question/answer card with a streak counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashback {
    /// Stable identifier, assigned once and never changed
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    /// Consecutive correct reviews
    pub days: u32,
}

impl Flashback {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            days: 0,
        }
    }

    /// Overwrite question and answer; an edited card starts its streak over
    pub fn edit(&mut self, question: String, answer: String) {
        self.question = question;
        self.answer = answer;
        self.days = 0;
    }

    pub fn record_review(&mut self, was_correct: bool) {
        if was_correct {
            self.days = self.days.saturating_add(1);
        } else {
            self.days = 0;
        }
    }

    /// First eight hex digits of the id, enough to address a card by hand
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// Both fields must contain something other than whitespace
pub fn is_valid_entry(question: &str, answer: &str) -> bool {
    !question.trim().is_empty() && !answer.trim().is_empty()
}

/// Summary over the whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashbackStats {
    pub total: usize,
    /// Cards with at least one correct review since the last reset
    pub active_streaks: usize,
    pub longest_streak: u32,
}

impl FlashbackStats {
    pub fn from_flashbacks(flashbacks: &[Flashback]) -> Self {
        Self {
            total: flashbacks.len(),
            active_streaks: flashbacks.iter().filter(|f| f.days > 0).count(),
            longest_streak: flashbacks.iter().map(|f| f.days).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flashback_starts_at_zero() {
        let card = Flashback::new("2+2?".to_string(), "4".to_string());
        assert_eq!(card.days, 0);
        assert_eq!(card.question, "2+2?");
        assert_eq!(card.answer, "4");
    }

    #[test]
    fn test_review_increments_and_resets() {
        let mut card = Flashback::new("q".to_string(), "a".to_string());
        card.record_review(true);
        card.record_review(true);
        assert_eq!(card.days, 2);

        card.record_review(false);
        assert_eq!(card.days, 0);
    }

    #[test]
    fn test_review_saturates() {
        let mut card = Flashback::new("q".to_string(), "a".to_string());
        card.days = u32::MAX;
        card.record_review(true);
        assert_eq!(card.days, u32::MAX);
    }

    #[test]
    fn test_edit_resets_days_and_keeps_id() {
        let mut card = Flashback::new("q".to_string(), "a".to_string());
        card.days = 7;
        let id = card.id;

        card.edit("new q".to_string(), "new a".to_string());

        assert_eq!(card.id, id);
        assert_eq!(card.question, "new q");
        assert_eq!(card.answer, "new a");
        assert_eq!(card.days, 0);
    }

    #[test]
    fn test_is_valid_entry() {
        assert!(is_valid_entry("2+2?", "4"));
        assert!(is_valid_entry(" padded ", "x"));

        assert!(!is_valid_entry("", "x"));
        assert!(!is_valid_entry("x", ""));
        assert!(!is_valid_entry("  ", "x"));
        assert!(!is_valid_entry("x", "\t\n"));
    }

    #[test]
    fn test_deserialize_rejects_negative_days() {
        let json = r#"[{"question":"q","answer":"a","days":-1}]"#;
        assert!(serde_json::from_str::<Vec<Flashback>>(json).is_err());
    }

    #[test]
    fn test_deserialize_requires_days() {
        let json = r#"[{"id":"0b1c2d3e-0000-4000-8000-000000000001","question":"q","answer":"a"}]"#;
        assert!(serde_json::from_str::<Vec<Flashback>>(json).is_err());
    }

    #[test]
    fn test_short_id() {
        let card = Flashback::new("q".to_string(), "a".to_string());
        let short = card.short_id();
        assert_eq!(short.len(), 8);
        assert!(card.id.simple().to_string().starts_with(&short));
    }

    #[test]
    fn test_stats() {
        let mut a = Flashback::new("a".to_string(), "a".to_string());
        let mut b = Flashback::new("b".to_string(), "b".to_string());
        let c = Flashback::new("c".to_string(), "c".to_string());
        a.days = 2;
        b.days = 5;

        let stats = FlashbackStats::from_flashbacks(&[a, b, c]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active_streaks, 2);
        assert_eq!(stats.longest_streak, 5);

        assert_eq!(FlashbackStats::from_flashbacks(&[]), FlashbackStats::default());
    }
}
