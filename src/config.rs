//! Settings for a fill.

/// Configuration for `find_fill`.
///
/// ```
/// use crossword_csp::FillConfig;
///
/// let config = FillConfig::default()
///     .with_initial_arc_consistency(false)
///     .with_state_limit(10_000);
/// assert_eq!(config.state_limit, Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillConfig {
    /// Run AC-3 over the whole grid before searching. Turning this off never changes whether a
    /// fill exists, only how long the search takes to find it.
    pub initial_arc_consistency: bool,

    /// Give up after trying this many (slot, word) choices. `None` searches exhaustively.
    pub state_limit: Option<u64>,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            initial_arc_consistency: true,
            state_limit: None,
        }
    }
}

impl FillConfig {
    pub fn with_initial_arc_consistency(mut self, enabled: bool) -> Self {
        self.initial_arc_consistency = enabled;
        self
    }

    pub fn with_state_limit(mut self, limit: u64) -> Self {
        self.state_limit = Some(limit);
        self
    }
}
