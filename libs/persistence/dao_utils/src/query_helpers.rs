use tokio_postgres::types::ToSql;

// Type aliases for PostgreSQL parameter types
pub type PgParam = dyn ToSql + Sync;
pub type PgSendParam = dyn ToSql + Sync + Send;
pub type PgParamBox = Box<PgSendParam>;
pub type PgParamVec = Vec<PgParamBox>;

/// Accumulates `AND`-ed conditions together with their bound parameters.
///
/// Placeholders are numbered in push order, so the rendered clause and
/// [`WhereClause::param_refs`] always line up.
#[derive(Default)]
pub struct WhereClause {
    conditions: Vec<String>,
    params: PgParamVec,
}

impl WhereClause {
    pub fn new() -> Self { Self::default() }

    /// Adds a condition; `render` receives the placeholder index (`$n`)
    /// assigned to `param`.
    pub fn push<P, F>(&mut self, param: P, render: F)
    where
        P: ToSql + Sync + Send + 'static,
        F: FnOnce(usize) -> String,
    {
        let index = self.params.len() + 1;
        self.conditions.push(render(index));
        self.params.push(Box::new(param));
    }

    pub fn is_empty(&self) -> bool { self.conditions.is_empty() }

    pub fn param_count(&self) -> usize { self.params.len() }

    pub fn conditions(&self) -> &[String] { &self.conditions }

    /// Renders ` WHERE a AND b`, or an empty string when nothing was pushed.
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.conditions.join(" AND "))
    }

    pub fn param_refs(&self) -> Vec<&PgParam> {
        self.params.iter().map(|p| &**p as &PgParam).collect()
    }
}

pub fn first_row_or_not_found<T, E, F>(
    rows: &[tokio_postgres::Row], mapper: F, not_found_error: E,
) -> Result<T, E>
where
    F: FnOnce(&tokio_postgres::Row) -> T,
{
    rows.first().map(mapper).ok_or(not_found_error)
}
