mod forget_error;
mod store_error;

pub use forget_error::ForgetError;
pub use store_error::StoreError;

/// Result alias used across the workspace.
pub type ForgetResult<T> = Result<T, ForgetError>;
