use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub targets: TargetsConfig,
    pub output: OutputConfig,
    pub crawl: CrawlConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetsConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    /// Upper bound on a single page navigation.
    pub navigation_timeout_ms: u64,
    /// Upper bound on the navigation triggered by a contact-link click.
    pub click_timeout_ms: u64,
    /// Pause after DOM parse so client-rendered content can populate.
    pub settle_ms: u64,
    /// Pause after a successful contact click before capturing content.
    pub post_click_settle_ms: u64,
    /// Pause between targets to avoid hammering sites.
    pub target_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: TargetsConfig {
                path: "targets.csv".to_string(),
            },
            output: OutputConfig {
                path: "out/emails.csv".to_string(),
            },
            crawl: CrawlConfig {
                navigation_timeout_ms: 30_000,
                click_timeout_ms: 6_000,
                settle_ms: 1_500,
                post_click_settle_ms: 1_200,
                target_delay_ms: 2_500,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
