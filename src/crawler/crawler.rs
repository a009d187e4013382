// src/crawler/crawler.rs
use crate::config::CrawlConfig;
use crate::crawler::affordance;
use crate::crawler::browser::BrowserSession;
use crate::crawler::extractor::EmailExtractor;
use crate::crawler::types::{CrawlError, CrawlOutcome};
use crate::models::{Finding, Result, Target};
use std::time::Duration;
use tracing::{debug, info, warn};

const BODY_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

pub struct TargetCrawler {
    session: BrowserSession,
    extractor: EmailExtractor,
    config: CrawlConfig,
}

impl TargetCrawler {
    pub async fn launch(config: CrawlConfig) -> Result<Self> {
        let session = BrowserSession::launch().await?;
        Ok(Self {
            session,
            extractor: EmailExtractor::new(),
            config,
        })
    }

    /// Processes every target in order, strictly sequentially. A failed
    /// target is logged and recorded; it never aborts the run.
    pub async fn crawl_all(&self, targets: &[Target]) -> Vec<CrawlOutcome> {
        info!("🕷️  Starting crawl of {} targets", targets.len());
        let mut outcomes = Vec::new();

        for (i, target) in targets.iter().enumerate() {
            println!(
                "[{}/{}] {} → {}",
                i + 1,
                targets.len(),
                target.brand,
                target.url
            );

            match self.crawl_target(target).await {
                Ok(findings) => {
                    info!("✅ {}: {} emails kept", target.brand, findings.len());
                    outcomes.push(CrawlOutcome::Harvested { findings });
                }
                Err(reason) => {
                    warn!("❌ {} ({}): {}", target.brand, target.url, reason);
                    outcomes.push(CrawlOutcome::Failed {
                        brand: target.brand.clone(),
                        reason,
                    });
                }
            }

            // Politeness throttle between targets, success or not.
            if i < targets.len() - 1 {
                tokio::time::sleep(Duration::from_millis(self.config.target_delay_ms)).await;
            }
        }

        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, CrawlOutcome::Failed { .. }))
            .count();
        info!(
            "🏁 Crawl complete: {}/{} targets succeeded",
            targets.len() - failed,
            targets.len()
        );

        outcomes
    }

    async fn crawl_target(&self, target: &Target) -> std::result::Result<Vec<Finding>, CrawlError> {
        let page = self.session.page();
        let nav_timeout = Duration::from_millis(self.config.navigation_timeout_ms);

        match tokio::time::timeout(nav_timeout, page.goto(target.url.as_str())).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(CrawlError::Navigation(e.to_string())),
            Err(_) => {
                return Err(CrawlError::NavigationTimeout(
                    self.config.navigation_timeout_ms,
                ))
            }
        }

        // DOM parse is enough to proceed; the settle pause lets script-injected
        // contact info appear before anything is read.
        self.session.wait_for_dom_ready(nav_timeout).await;
        tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;

        affordance::activate_contact_affordance(page, &self.config).await;

        let html = match tokio::time::timeout(nav_timeout, page.content()).await {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => return Err(CrawlError::Capture(e.to_string())),
            Err(_) => {
                return Err(CrawlError::CaptureTimeout(
                    self.config.navigation_timeout_ms,
                ))
            }
        };

        // Some emails only show up in rendered text, others only in markup
        // (mailto hrefs), so both blobs are scanned and unioned. A failed or
        // hung text capture degrades to the HTML blob alone.
        let text = match tokio::time::timeout(nav_timeout, page.evaluate(BODY_TEXT_JS)).await {
            Ok(Ok(result)) => result.into_value::<String>().unwrap_or_default(),
            Ok(Err(e)) => {
                debug!("body text capture failed for {}: {}", target.brand, e);
                String::new()
            }
            Err(_) => {
                debug!("body text capture timed out for {}", target.brand);
                String::new()
            }
        };

        // Provenance is wherever the page ended up, not the requested URL.
        let source = match page.url().await {
            Ok(Some(url)) => url,
            _ => target.url.clone(),
        };

        Ok(harvest_emails(&self.extractor, &html, &text)
            .into_iter()
            .map(|email| Finding {
                brand: target.brand.clone(),
                source: source.clone(),
                email,
            })
            .collect())
    }

    pub async fn close(self) {
        self.session.close().await;
    }
}

// Union of both captured blobs, filtered, sorted for deterministic emission.
fn harvest_emails(extractor: &EmailExtractor, html: &str, text: &str) -> Vec<String> {
    let mut emails = extractor.extract(html);
    emails.extend(extractor.extract(text));
    let mut kept: Vec<String> = extractor.filter(emails).into_iter().collect();
    kept.sort();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvests_filtered_sorted_union_of_both_blobs() {
        let extractor = EmailExtractor::new();
        let html = r#"<a href="mailto:press@acme.test">press</a> noreply@acme.test"#;
        let text = "partnerships: partners@acme.test or press@acme.test";

        let emails = harvest_emails(&extractor, html, text);
        assert_eq!(emails, vec!["partners@acme.test", "press@acme.test"]);
    }

    #[test]
    fn landing_page_with_no_emails_harvests_nothing() {
        let extractor = EmailExtractor::new();
        assert!(harvest_emails(&extractor, "<html><body>hi</body></html>", "hi").is_empty());
    }
}
