// src/crawler/extractor.rs
use regex::Regex;
use std::collections::HashSet;

// Administrative senders nobody should be pitched at. Substring match on the
// lowercased address, so decorated forms like `something-noreply@x.com` are
// dropped too.
const BLOCKED_FRAGMENTS: &[&str] = &["noreply@", "no-reply@", "donotreply@"];

pub struct EmailExtractor {
    email_regex: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .unwrap(),
        }
    }

    /// Every non-overlapping email-shaped token in `text`, original case
    /// preserved. Pure; no browser involved.
    pub fn extract(&self, text: &str) -> HashSet<String> {
        self.email_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Drops administrative addresses from an extracted set.
    pub fn filter(&self, emails: HashSet<String>) -> HashSet<String> {
        emails
            .into_iter()
            .filter(|email| {
                let lower = email.to_lowercase();
                !BLOCKED_FRAGMENTS.iter().any(|bad| lower.contains(bad))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_email_from_surrounding_prose() {
        let extractor = EmailExtractor::new();
        let found = extractor.extract("reach us at hello@brand.com!");
        assert_eq!(found.len(), 1);
        assert!(found.contains("hello@brand.com"));
    }

    #[test]
    fn repeated_mentions_collapse_to_one() {
        let extractor = EmailExtractor::new();
        let found = extractor.extract("press@acme.test or press@acme.test");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn preserves_captured_case() {
        let extractor = EmailExtractor::new();
        let found = extractor.extract("Press@Acme.TEST");
        assert!(found.contains("Press@Acme.TEST"));
    }

    #[test]
    fn requires_a_plausible_tld() {
        let extractor = EmailExtractor::new();
        assert!(extractor.extract("not-an-email@host").is_empty());
        assert!(extractor.extract("bad@host.x").is_empty());
    }

    #[test]
    fn filter_drops_administrative_addresses() {
        let extractor = EmailExtractor::new();
        let emails: HashSet<String> = [
            "press@acme.test",
            "noreply@acme.test",
            "NO-REPLY@acme.test",
            "something-donotreply@acme.test",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let kept = extractor.filter(emails);
        assert_eq!(kept.len(), 1);
        assert!(kept.contains("press@acme.test"));
    }

    #[test]
    fn extract_then_filter_is_idempotent() {
        let extractor = EmailExtractor::new();
        let text = "write press@acme.test, not noreply@acme.test";
        let once = extractor.filter(extractor.extract(text));
        let twice = extractor.filter(extractor.extract(text));
        assert_eq!(once, twice);
        assert_eq!(once, extractor.filter(once.clone()));
    }
}
