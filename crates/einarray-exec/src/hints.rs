//! Execution hints and configuration

use einarray_core::BroadcastMode;

/// Execution hints for controlling tensor operations
///
/// ```
/// use einarray_core::BroadcastMode;
/// use einarray_exec::ExecHints;
///
/// let hints = ExecHints::new().with_broadcast(BroadcastMode::Permissive);
/// assert_eq!(hints.broadcast, BroadcastMode::Permissive);
/// assert_eq!(ExecHints::default().broadcast, BroadcastMode::Strict);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecHints {
    /// Shape rule used when elementwise operands are broadcast together
    pub broadcast: BroadcastMode,
}

impl ExecHints {
    /// Create new execution hints with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the broadcast rule
    pub fn with_broadcast(mut self, mode: BroadcastMode) -> Self {
        self.broadcast = mode;
        self
    }
}
