//! Host dashboard filter notifier.

use foundation::RegionId;
use scene::{NotifierError, SelectionNotifier};
use tracing::{info, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use crate::bridge::{host_apply_filter, host_clear_filter, host_find_worksheet, js_error_text};

/// Applies the focused region as a filter on one host worksheet.
#[derive(Debug)]
pub struct HostNotifier {
    worksheet: JsValue,
    field: String,
}

impl HostNotifier {
    /// Looks up the configured worksheet by name. With no name configured, or
    /// no matching worksheet, the host is unavailable.
    pub fn connect(worksheet_name: Option<&str>, field: &str) -> Result<Self, NotifierError> {
        let Some(name) = worksheet_name else {
            return Err(NotifierError::CapabilityUnavailable);
        };
        let worksheet = host_find_worksheet(name)
            .map_err(|e| NotifierError::Rejected(js_error_text(&e)))?;
        if worksheet.is_null() || worksheet.is_undefined() {
            warn!(worksheet = name, "worksheet not found on dashboard");
            return Err(NotifierError::CapabilityUnavailable);
        }
        Ok(Self {
            worksheet,
            field: field.to_string(),
        })
    }
}

impl SelectionNotifier for HostNotifier {
    fn apply_filter(&mut self, region: &RegionId) -> Result<(), NotifierError> {
        let promise = host_apply_filter(&self.worksheet, &self.field, region.as_str())
            .map_err(|e| NotifierError::Rejected(js_error_text(&e)))?;
        let region = region.clone();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => info!(region = %region, "filter applied"),
                Err(err) => {
                    warn!(region = %region, error = %js_error_text(&err), "host rejected filter")
                }
            }
        });
        Ok(())
    }

    fn clear_filter(&mut self) -> Result<(), NotifierError> {
        let promise = host_clear_filter(&self.worksheet, &self.field)
            .map_err(|e| NotifierError::Rejected(js_error_text(&e)))?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!(error = %js_error_text(&err), "host rejected filter clear");
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HostNotifier;
    use scene::NotifierError;

    #[test]
    fn no_worksheet_name_means_no_host() {
        let err = HostNotifier::connect(None, "Country").unwrap_err();
        assert!(matches!(err, NotifierError::CapabilityUnavailable));
    }
}
