use super::error::ApiError;

/// Who is performing a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User { user_id: usize, handle: String },
}

impl Principal {
    /// Handle of the authenticated user, or `ApiError::Unauthorized`.
    pub fn require_user(&self) -> Result<&str, ApiError> {
        match self {
            Principal::User { handle, .. } => Ok(handle),
            Principal::Anonymous => Err(ApiError::Unauthorized),
        }
    }
}
