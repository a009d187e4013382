// src/crawler/browser.rs
use crate::models::Result;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

// Resolves once the DOM is parsed; full resource load is deliberately not
// awaited so slow third-party assets cannot stall a target.
const DOM_READY_JS: &str = r#"
    (() => new Promise(resolve => {
        if (document.readyState !== 'loading') { resolve(true); return; }
        document.addEventListener('DOMContentLoaded', () => resolve(true), { once: true });
    }))()
"#;

/// One headless browser with a single page that is re-navigated for every
/// target. The CDP event stream must be drained for the connection to make
/// progress, so the handler runs on its own task for the session's lifetime.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1280, 800)
            .arg(format!("--user-agent={}", USER_AGENT))
            .build()
            .map_err(|e| format!("invalid browser configuration: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| format!("browser launch failed: {}", e))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser event loop closed: {}", e);
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Best-effort wait for the DOM to be parsed; a timeout falls through to
    /// content capture rather than failing the target.
    pub async fn wait_for_dom_ready(&self, timeout: Duration) {
        match tokio::time::timeout(timeout, self.page.evaluate(DOM_READY_JS)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => debug!("DOM readiness probe failed: {}", e),
            Err(_) => debug!("DOM not parsed within {:?}, capturing anyway", timeout),
        }
    }

    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

impl Drop for BrowserSession {
    // Abnormal exits must not leave the event loop task running.
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
