//! Classification of database driver errors.

/// Constraint guarding token uniqueness.
pub const SHORT_TOKEN_CONSTRAINT: &str = "urls_short_token_key";

/// Constraint guarding original URL uniqueness.
pub const ORIGINAL_URL_CONSTRAINT: &str = "urls_original_url_key";

/// Returns the violated constraint name if `e` is a unique violation.
///
/// The name is empty when the driver does not report it.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().unwrap_or_default().to_string())
}
