use foundation::RegionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierError {
    /// The host accepted the call but refused to apply the filter.
    Rejected(String),
    /// No host integration is present (e.g. running outside the dashboard).
    CapabilityUnavailable,
}

impl std::fmt::Display for NotifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifierError::Rejected(reason) => write!(f, "host rejected filter: {reason}"),
            NotifierError::CapabilityUnavailable => write!(f, "host filter API unavailable"),
        }
    }
}

impl std::error::Error for NotifierError {}

/// Pushes the focused region into the host dashboard's filter state.
///
/// Calls are fire-and-forget. An implementation backed by an asynchronous
/// host API returns `Ok` once the request is submitted and reports a later
/// rejection on its own.
pub trait SelectionNotifier {
    fn apply_filter(&mut self, region: &RegionId) -> Result<(), NotifierError>;

    fn clear_filter(&mut self) -> Result<(), NotifierError> {
        Ok(())
    }
}

/// Notifier used when there is no host to notify.
#[derive(Debug, Default, Copy, Clone)]
pub struct DetachedNotifier;

impl SelectionNotifier for DetachedNotifier {
    fn apply_filter(&mut self, _region: &RegionId) -> Result<(), NotifierError> {
        Ok(())
    }
}
