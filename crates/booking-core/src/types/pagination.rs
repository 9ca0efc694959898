//! Limit/offset pagination rules for list endpoints.

/// Limit applied when the caller asks for zero or a negative number of rows.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a requested limit into `(0, MAX_LIMIT]`.
///
/// Non-positive values fall back to [`DEFAULT_LIMIT`].
pub fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

/// Negative offsets are treated as zero.
pub fn clamp_offset(offset: i64) -> i64 {
    offset.max(0)
}
