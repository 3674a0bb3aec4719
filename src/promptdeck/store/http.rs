use super::CardSource;
use crate::error::{DeckError, Result};
use crate::model::CardDocument;

/// Fetches the card document with a single blocking GET.
///
/// There is no retry and no timeout beyond the client defaults; a failed
/// fetch is reported to the caller, which decides whether to fall back.
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CardSource for HttpSource {
    fn load(&self) -> Result<CardDocument> {
        tracing::debug!(url = %self.url, "fetching card document");
        let response = reqwest::blocking::get(&self.url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Store(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }
        let body = response.text()?;
        let doc = serde_json::from_str(&body)?;
        Ok(doc)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
