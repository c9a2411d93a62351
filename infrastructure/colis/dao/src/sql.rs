//! Rendering of a [`ColisPredicate`] into parameterised SQL.
//!
//! Values are always bound; nothing from the request is interpolated into
//! the statement text.

use colis_queries::{ColisClause, ColisPredicate};
use dao_utils::{pagination::PaginationParams, query_helpers::WhereClause};

pub const COLIS_COLUMNS: &str = "c.id, c.description, c.weight_kg, \
                                 c.destination_city, c.destination_address, \
                                 c.status, c.priority, c.zone_id, \
                                 c.created_at, c.updated_at";

const ORDER_BY: &str = "ORDER BY c.created_at DESC, c.id DESC";

pub struct ColisFilter {
    pub from: String,
    pub where_clause: WhereClause,
}

pub fn render_filter(predicate: &ColisPredicate) -> ColisFilter {
    let mut from = String::from("FROM colis c");
    if predicate.requires_zone_join() {
        from.push_str(" JOIN zones z ON z.id = c.zone_id");
    }

    let mut where_clause = WhereClause::new();
    for clause in predicate.clauses() {
        match clause {
            ColisClause::StatusEq(status) => {
                where_clause.push(status.as_str().to_string(), |i| {
                    format!("c.status = ${i}")
                });
            }
            ColisClause::ZoneIdEq(zone_id) => {
                where_clause
                    .push(zone_id.clone(), |i| format!("z.id::text = ${i}"));
            }
            ColisClause::CityContains(needle) => {
                where_clause.push(needle.clone(), |i| {
                    format!("strpos(LOWER(c.destination_city), ${i}) > 0")
                });
            }
            ColisClause::PriorityEq(priority) => {
                where_clause.push(priority.as_str().to_string(), |i| {
                    format!("c.priority = ${i}")
                });
            }
        }
    }

    ColisFilter { from, where_clause }
}

/// Full list statement plus the pagination values bound after the filter
/// parameters.
pub fn list_query(
    filter: &ColisFilter, pagination: &PaginationParams,
) -> (String, Vec<i64>) {
    let base = format!(
        "SELECT {COLIS_COLUMNS} {}{}",
        filter.from,
        filter.where_clause.to_sql()
    );
    pagination.build_query_with_existing_params(
        &base,
        ORDER_BY,
        filter.where_clause.param_count(),
    )
}
