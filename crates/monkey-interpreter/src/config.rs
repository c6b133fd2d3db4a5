//! Evaluation limits.

/// Interpreter configuration.
///
/// By default nothing bounds recursion except the host stack. Hosts that run
/// untrusted programs can set a call-depth limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Calls nested deeper than this evaluate to an `Error` value instead of
    /// recursing further. `None` means unlimited.
    pub max_call_depth: Option<usize>,
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }
}
