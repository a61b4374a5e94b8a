use serde::Serialize;

/// Offset/limit window over an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of rows to skip
    pub offset: i64,
    /// Maximum number of rows to return
    pub limit: i64,
}

/// One page of results together with the total row count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}
