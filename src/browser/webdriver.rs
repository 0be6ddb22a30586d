use crate::browser::Browser;
use crate::config::SiteConfig;
use crate::error::{Result, ScrapeError};
use fantoccini::wd::{Capabilities, TimeoutConfiguration};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Common alternative WebDriver endpoints tried when the configured one fails
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A live WebDriver session.
///
/// Open with [`WebDriverSession::connect`] and release with
/// [`WebDriverSession::close`]; the session is not closed on drop.
pub struct WebDriverSession {
    client: Client,
    settle: Duration,
}

impl WebDriverSession {
    /// Opens a browser session, trying fallback endpoints if the configured
    /// WebDriver URL is unreachable
    pub async fn connect(site: &SiteConfig) -> Result<Self> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(site.headless));

        let candidates = std::iter::once(site.webdriver_url.as_str()).chain(
            FALLBACK_WEBDRIVER_URLS
                .into_iter()
                .filter(|url| *url != site.webdriver_url),
        );

        let mut tried = Vec::new();
        for url in candidates {
            tried.push(url);
            match builder.connect(url).await {
                Ok(client) => {
                    ::log::debug!("Connected to WebDriver at {}", url);
                    let session = Self {
                        client,
                        settle: Duration::from_millis(site.settle_millis),
                    };
                    session.apply_timeouts(site.page_load_timeout_secs).await;
                    return Ok(session);
                }
                Err(e) if url == site.webdriver_url => {
                    ::log::error!("Failed to connect to WebDriver at {}: {}", url, e);
                }
                Err(_) => {
                    // Don't log error for fallbacks to avoid log spam
                }
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Connect {
            tried: tried.join(", "),
        })
    }

    async fn apply_timeouts(&self, page_load_secs: u64) {
        let timeouts =
            TimeoutConfiguration::new(None, Some(Duration::from_secs(page_load_secs)), None);
        if let Err(e) = self.client.update_timeouts(timeouts).await {
            ::log::warn!("Could not set page load timeout: {}", e);
        }
    }

    /// Ends the WebDriver session
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        } else {
            ::log::debug!("WebDriver session closed");
        }
    }
}

impl Browser for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, "accessing", url))
    }

    async fn fill(&mut self, field_id: &str, value: &str) -> Result<()> {
        let context = || format!("filling #{field_id}");
        let input = self
            .client
            .find(Locator::Id(field_id))
            .await
            .map_err(|e| ScrapeError::browser(context(), e))?;
        input
            .clear()
            .await
            .map_err(|e| ScrapeError::browser(context(), e))?;
        input
            .send_keys(value)
            .await
            .map_err(|e| ScrapeError::browser(context(), e))
    }

    async fn check(&mut self, selector: &str) -> Result<()> {
        let context = || format!("ticking {selector}");
        let checkbox = self
            .client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| ScrapeError::browser(context(), e))?;
        let ticked = checkbox
            .is_selected()
            .await
            .map_err(|e| ScrapeError::browser(context(), e))?;
        if !ticked {
            checkbox
                .click()
                .await
                .map_err(|e| ScrapeError::browser(context(), e))?;
        }
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let context = || format!("clicking {selector}");
        self.client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| ScrapeError::browser(context(), e))?
            .click()
            .await
            .map_err(|e| ScrapeError::browser(context(), e))
    }

    async fn source(&mut self) -> Result<String> {
        self.client
            .source()
            .await
            .map_err(|e| ScrapeError::browser("getting page source", e))
    }

    async fn settle(&mut self) {
        tokio::time::sleep(self.settle).await;
    }
}

/// Chrome options for an unattended session
fn chrome_capabilities(headless: bool) -> Capabilities {
    let mut args = vec![
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--window-size=1920,1080",
    ];
    if headless {
        args.insert(0, "--headless");
    }

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

/// Wraps a navigation error, noting when the session itself was lost
fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> ScrapeError {
    let error = ScrapeError::browser(format!("{context} {url}"), error);
    if error.is_lost_session() {
        ::log::warn!("Lost WebDriver session while {} {}", context, url);
    }
    error
}
