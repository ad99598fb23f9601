// Directory operation errors.

/// Failure of a sign-up or unregister request.
///
/// `Display` renders the exact text returned to the caller as `detail`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Activity not found")]
    NotFound { activity: String },
    #[error("{email} is already signed up for this activity")]
    AlreadySignedUp { activity: String, email: String },
    #[error("{email} is not registered for this activity")]
    NotRegistered { activity: String, email: String },
}

impl DirectoryError {
    /// Metric label for the failure kind.
    pub fn outcome(&self) -> &'static str {
        match self {
            DirectoryError::NotFound { .. } => "not_found",
            DirectoryError::AlreadySignedUp { .. } | DirectoryError::NotRegistered { .. } => {
                "conflict"
            }
        }
    }
}
