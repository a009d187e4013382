// src/crawler/affordance.rs
use crate::config::CrawlConfig;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::debug;

/// One heuristic for spotting a contact-page affordance. All matching is
/// case-insensitive substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordanceRule {
    /// Visible text of an anchor or button.
    Text(&'static str),
    /// `aria-label` attribute of an anchor.
    AriaLabel(&'static str),
    /// `href` attribute of an anchor.
    HrefContains(&'static str),
}

/// Priority order: explicit contact wording first, then press/partnership
/// wording, then attribute-level hints. First visible match wins.
pub const CONTACT_RULES: &[AffordanceRule] = &[
    AffordanceRule::Text("Contact Us"),
    AffordanceRule::Text("Contact"),
    AffordanceRule::Text("Press"),
    AffordanceRule::Text("Media"),
    AffordanceRule::Text("PR"),
    AffordanceRule::Text("Partnership"),
    AffordanceRule::Text("Partner"),
    AffordanceRule::Text("Creators"),
    AffordanceRule::AriaLabel("contact"),
    AffordanceRule::HrefContains("contact"),
    AffordanceRule::HrefContains("press"),
    AffordanceRule::HrefContains("media"),
    AffordanceRule::HrefContains("partner"),
    AffordanceRule::HrefContains("creator"),
];

impl AffordanceRule {
    fn selector(&self) -> &'static str {
        match self {
            AffordanceRule::Text(_) => "a, button",
            AffordanceRule::AriaLabel(_) => "a[aria-label]",
            AffordanceRule::HrefContains(_) => "a[href]",
        }
    }

    fn predicate(&self) -> String {
        let needle = match self {
            AffordanceRule::Text(n)
            | AffordanceRule::AriaLabel(n)
            | AffordanceRule::HrefContains(n) => {
                serde_json::to_string(&n.to_lowercase()).unwrap_or_else(|_| "\"\"".to_string())
            }
        };
        match self {
            AffordanceRule::Text(_) => {
                format!("(el.innerText || '').toLowerCase().includes({})", needle)
            }
            AffordanceRule::AriaLabel(_) => format!(
                "(el.getAttribute('aria-label') || '').toLowerCase().includes({})",
                needle
            ),
            AffordanceRule::HrefContains(_) => format!(
                "(el.getAttribute('href') || '').toLowerCase().includes({})",
                needle
            ),
        }
    }

    // Clicks the first visible match and reports whether a click happened.
    fn click_probe(&self) -> String {
        format!(
            r#"(() => {{
                const visible = el => {{
                    const style = window.getComputedStyle(el);
                    if (!style || style.display === 'none' || style.visibility === 'hidden') return false;
                    const rect = el.getBoundingClientRect();
                    return rect.width > 1 && rect.height > 1;
                }};
                for (const el of document.querySelectorAll('{selector}')) {{
                    if (!({predicate})) continue;
                    if (!visible(el)) continue;
                    el.click();
                    return true;
                }}
                return false;
            }})()"#,
            selector = self.selector(),
            predicate = self.predicate()
        )
    }
}

/// Tries each rule in order; on the first visible match, clicks it and waits
/// for the resulting navigation. Returns true once a click-and-navigate
/// completed. Absent candidates, failed probes, and navigation timeouts all
/// fall through silently to the next rule; exhausting every rule is a normal
/// outcome, since many sites keep contact emails on the landing page itself.
pub async fn activate_contact_affordance(page: &Page, crawl: &CrawlConfig) -> bool {
    let timeout = Duration::from_millis(crawl.click_timeout_ms);

    for rule in CONTACT_RULES {
        let clicked = match tokio::time::timeout(timeout, page.evaluate(rule.click_probe())).await
        {
            Ok(Ok(result)) => result.into_value::<bool>().unwrap_or(false),
            Ok(Err(e)) => {
                debug!("affordance probe {:?} failed: {}", rule, e);
                continue;
            }
            Err(_) => {
                debug!("affordance probe {:?} timed out", rule);
                continue;
            }
        };
        if !clicked {
            continue;
        }

        debug!("clicked contact affordance {:?}", rule);
        match tokio::time::timeout(timeout, page.wait_for_navigation()).await {
            Ok(Ok(_)) => {
                tokio::time::sleep(Duration::from_millis(crawl.post_click_settle_ms)).await;
                return true;
            }
            Ok(Err(e)) => debug!("navigation after {:?} click failed: {}", rule, e),
            Err(_) => debug!(
                "no navigation within {}ms after {:?} click",
                crawl.click_timeout_ms, rule
            ),
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_keep_wording_before_attribute_hints() {
        assert_eq!(CONTACT_RULES[0], AffordanceRule::Text("Contact Us"));
        assert_eq!(CONTACT_RULES[1], AffordanceRule::Text("Contact"));
        assert_eq!(CONTACT_RULES[8], AffordanceRule::AriaLabel("contact"));
        assert_eq!(CONTACT_RULES[9], AffordanceRule::HrefContains("contact"));
        assert_eq!(CONTACT_RULES.len(), 14);

        let first_attribute = CONTACT_RULES
            .iter()
            .position(|r| !matches!(r, AffordanceRule::Text(_)))
            .unwrap();
        assert!(CONTACT_RULES[..first_attribute]
            .iter()
            .all(|r| matches!(r, AffordanceRule::Text(_))));
    }

    #[test]
    fn probes_target_the_right_source_and_lowercase_the_needle() {
        let text = AffordanceRule::Text("Contact Us").click_probe();
        assert!(text.contains("el.innerText"));
        assert!(text.contains("\"contact us\""));
        assert!(text.contains("'a, button'"));

        let aria = AffordanceRule::AriaLabel("contact").click_probe();
        assert!(aria.contains("getAttribute('aria-label')"));

        let href = AffordanceRule::HrefContains("press").click_probe();
        assert!(href.contains("getAttribute('href')"));
        assert!(href.contains("\"press\""));
        assert!(href.contains("'a[href]'"));
    }

    #[test]
    fn probes_check_visibility_before_clicking() {
        let probe = AffordanceRule::Text("Press").click_probe();
        assert!(probe.contains("getComputedStyle"));
        assert!(probe.contains("el.click()"));
    }
}
