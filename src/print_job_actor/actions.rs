//! Custom actions for the sandbox print job actor.

/// Operations on a provider-side print job beyond creation.
#[derive(Debug, Clone)]
pub enum PrintJobAction {
    /// Returns the current status. A job still in `CREATED` is reviewed first.
    CheckStatus,
}
