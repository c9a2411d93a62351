use tokio_postgres::types::ToSql;

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: u64,
    pub offset: u64,
}

impl PaginationParams {
    /// Missing limit falls back to [`DEFAULT_PAGE_SIZE`]; any limit is
    /// capped at [`MAX_PAGE_SIZE`]. Offsets beyond what Postgres accepts
    /// as a `BIGINT` are clamped to `i64::MAX`.
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).min(i64::MAX as u64),
        }
    }

    /// Appends `ORDER BY`, `LIMIT` and `OFFSET` to a query that already
    /// binds `existing_param_count` parameters.
    pub fn build_query_with_existing_params(
        &self, base_query: &str, order_by: &str, existing_param_count: usize,
    ) -> (String, Vec<i64>) {
        let limit_index = existing_param_count + 1;
        let offset_index = existing_param_count + 2;
        let query = format!(
            "{base_query} {order_by} LIMIT ${limit_index} OFFSET ${offset_index}"
        );

        (query, vec![to_bigint(self.limit), to_bigint(self.offset)])
    }

    pub fn window<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }
}

fn to_bigint(value: u64) -> i64 { i64::try_from(value).unwrap_or(i64::MAX) }

impl Default for PaginationParams {
    fn default() -> Self { Self::new(None, None) }
}

pub fn create_param_refs<T: ToSql + Sync>(
    params: &[T],
) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}
