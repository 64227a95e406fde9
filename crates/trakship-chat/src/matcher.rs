//! Keyword-scored FAQ matching.

use trakship_core::types::FaqEntry;

/// Score a message against one FAQ entry.
///
/// Each keyword found as a case-insensitive substring of the message adds 2.
/// Each question word longer than 3 characters that shares a substring
/// relation (either direction) with some message word adds 1.
fn score(message_lower: &str, entry: &FaqEntry) -> u32 {
    let mut score = 0;

    for keyword in &entry.keywords {
        if message_lower.contains(&keyword.to_lowercase()) {
            score += 2;
        }
    }

    let question_lower = entry.question.to_lowercase();
    let user_words: Vec<&str> = message_lower.split(' ').collect();

    for word in question_lower.split(' ') {
        if word.len() > 3
            && user_words
                .iter()
                .any(|uw| uw.contains(word) || word.contains(uw))
        {
            score += 1;
        }
    }

    score
}

/// Find the best-matching FAQ for a message.
///
/// Entries must already be ordered by priority (highest first). The entry
/// with the strictly highest positive score wins; on a tie the earlier
/// entry is kept. Returns `None` when nothing scores above zero.
pub fn find_best_match<'a>(message: &str, entries: &'a [FaqEntry]) -> Option<&'a FaqEntry> {
    let message_lower = message.to_lowercase();

    let mut best: Option<&FaqEntry> = None;
    let mut highest = 0;

    for entry in entries {
        let s = score(&message_lower, entry);
        if s > highest {
            highest = s;
            best = Some(entry);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_faqs;
    use trakship_core::types::FaqCategory;

    #[test]
    fn test_rates_question_matches_pricing() {
        let faqs = default_faqs();
        let best = find_best_match("What are your shipping rates?", &faqs).unwrap();
        assert_eq!(best.category, FaqCategory::Pricing);
    }

    #[test]
    fn test_payment_question_matches_payment_faq() {
        let faqs = default_faqs();
        let best = find_best_match("do you take paypal", &faqs).unwrap();
        assert_eq!(best.question, "What payment methods do you accept?");
    }

    #[test]
    fn test_international_question() {
        let faqs = default_faqs();
        let best = find_best_match("can you ship overseas?", &faqs).unwrap();
        assert_eq!(best.question, "Do you offer international shipping?");
    }

    #[test]
    fn test_gibberish_matches_nothing() {
        let faqs = default_faqs();
        assert!(find_best_match("asdkjfh qwpoiu", &faqs).is_none());
    }

    #[test]
    fn test_keyword_substring_is_permissive() {
        // "pay" inside "repayment" still scores the payment keyword.
        let faqs = default_faqs();
        let best = find_best_match("question about repayment", &faqs).unwrap();
        assert_eq!(best.question, "What payment methods do you accept?");
    }

    #[test]
    fn test_tie_keeps_earlier_entry() {
        let a = FaqEntry::seed("First?", &["shared"], "A", FaqCategory::General);
        let b = FaqEntry::seed("Second?", &["shared"], "B", FaqCategory::General);
        let entries = vec![a, b];

        let best = find_best_match("shared", &entries).unwrap();
        assert_eq!(best.question, "First?");
    }

    #[test]
    fn test_keywords_outweigh_question_words() {
        let kw = FaqEntry::seed("Unrelated?", &["widget"], "A", FaqCategory::General);
        let qw = FaqEntry::seed("About widget stuff?", &[], "B", FaqCategory::General);
        let entries = vec![qw, kw];

        // One keyword hit (2) beats one question-word hit (1).
        let best = find_best_match("widget", &entries).unwrap();
        assert_eq!(best.question, "Unrelated?");
    }

    #[test]
    fn test_short_question_words_ignored() {
        let entry = FaqEntry::seed("Is it up?", &[], "A", FaqCategory::General);
        // Every question word has length <= 3, so nothing scores.
        assert!(find_best_match("is it up", &[entry]).is_none());
    }
}
