use crate::error::Result;

/// What the scraper needs from a browser.
///
/// Each call completes before the next one is issued; implementations are
/// never driven concurrently.
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Navigate to an address and wait for it to load
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Replace the contents of the input with the given element id
    async fn fill(&mut self, field_id: &str, value: &str) -> Result<()>;

    /// Tick a checkbox unless it is already ticked
    async fn check(&mut self, selector: &str) -> Result<()>;

    /// Click the element, typically a form's submit button
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Rendered markup of the current page
    async fn source(&mut self) -> Result<String>;

    /// Give the page time to finish scripted rendering
    async fn settle(&mut self) {}
}
