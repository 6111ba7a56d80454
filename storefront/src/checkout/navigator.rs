//! Location changes requested by the checkout

use parking_lot::Mutex;

/// Browser-location side effects
pub trait Navigator: Send + Sync {
    /// Leave for an external page
    fn redirect(&self, url: &str);

    /// Swap the current location without a history entry
    fn replace_location(&self, path: &str);
}

/// Logs the requested navigation; used by the CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, url: &str) {
        tracing::info!(%url, "Redirecting to payment provider");
    }

    fn replace_location(&self, path: &str) {
        tracing::debug!(%path, "Location replaced");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Redirect(String),
    Replace(String),
}

/// Keeps every navigation in order
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Navigation> {
        self.events.lock().clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Navigation::Redirect(url) => Some(url.clone()),
                Navigation::Replace(_) => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, url: &str) {
        self.events.lock().push(Navigation::Redirect(url.to_string()));
    }

    fn replace_location(&self, path: &str) {
        self.events.lock().push(Navigation::Replace(path.to_string()));
    }
}
