use crate::constants::{MAX_IMAGE_PATH_LEN, MAX_STORE_KEY_LEN};
use crate::error::AppError;
use std::path::Path;

/// Validate a published heatmap image path.
///
/// The store contract only promises an absolute path; existence is checked
/// on every refresh, not here.
pub fn validate_image_path(path: &str) -> Result<&str, AppError> {
    if path.is_empty() {
        return Err(AppError::InvalidInput {
            field: "path",
            reason: "cannot be empty".into(),
        });
    }
    if path.len() > MAX_IMAGE_PATH_LEN {
        return Err(AppError::InvalidInput {
            field: "path",
            reason: format!("cannot exceed {MAX_IMAGE_PATH_LEN} characters"),
        });
    }
    if !Path::new(path).is_absolute() {
        return Err(AppError::InvalidInput {
            field: "path",
            reason: "must be an absolute path".into(),
        });
    }
    Ok(path)
}

/// Validate a shared store key.
pub fn validate_store_key(key: &str) -> Result<&str, AppError> {
    if key.is_empty() {
        return Err(AppError::InvalidInput {
            field: "key",
            reason: "cannot be empty".into(),
        });
    }
    if key.len() > MAX_STORE_KEY_LEN {
        return Err(AppError::InvalidInput {
            field: "key",
            reason: format!("cannot exceed {MAX_STORE_KEY_LEN} characters"),
        });
    }
    Ok(key)
}

/// Validate a host-assigned widget instance identifier.
pub fn validate_instance_id(id: i64) -> Result<i64, AppError> {
    if id <= 0 {
        return Err(AppError::InvalidInput {
            field: "widget_id",
            reason: "must be positive".into(),
        });
    }
    Ok(id)
}
