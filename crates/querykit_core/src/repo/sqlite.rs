//! Shared SQLite statement building for entity repositories.
//!
//! # Invariants
//! - Natural order is `<table>.id ASC`; explicit orderings get `id` as the
//!   final tie-breaker so paging is deterministic.
//! - Every caller-supplied value is bound, never formatted into SQL.

use crate::config::QueryConfig;
use crate::model::field::{Entity, Field, Value};
use crate::predicate::sql::to_sql;
use crate::predicate::{check_field, Predicate, PredicateError};
use crate::query::Query;
use crate::repo::RepoResult;
use log::debug;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, Row};
use std::time::Instant;

/// Entity that can be decoded from a `SELECT <COLUMNS> FROM <TABLE>` row.
pub(crate) trait SqlEntity: Entity {
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

pub(crate) fn select<E: SqlEntity>(
    conn: &Connection,
    query: &Query,
    config: &QueryConfig,
) -> RepoResult<Vec<E>> {
    query.validate_for::<E>()?;
    let started_at = Instant::now();

    let filter = to_sql(&query.predicate, config.case_sensitive);
    let mut sql = format!(
        "SELECT {} FROM {} WHERE {}",
        E::COLUMNS,
        E::TABLE,
        filter.sql
    );
    let mut bind_values: Vec<SqlValue> = filter.params.iter().map(bind_value).collect();

    sql.push_str(" ORDER BY ");
    for order in &query.order_by {
        sql.push_str(&format!(
            "{}.{} {}, ",
            order.field.entity,
            order.field.name,
            order.direction.as_sql()
        ));
    }
    sql.push_str(&format!("{}.id ASC", E::TABLE));

    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(SqlValue::Integer(to_i64(limit)));
        if query.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(SqlValue::Integer(to_i64(query.offset)));
        }
    } else if query.offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(SqlValue::Integer(to_i64(query.offset)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut entities = Vec::new();
    while let Some(row) = rows.next()? {
        entities.push(E::from_row(row)?);
    }

    debug!(
        "event=query_fetch module=repo status=ok entity={} rows={} duration_ms={}",
        E::TABLE,
        entities.len(),
        started_at.elapsed().as_millis()
    );
    Ok(entities)
}

pub(crate) fn count<E: Entity>(
    conn: &Connection,
    predicate: &Predicate,
    config: &QueryConfig,
) -> RepoResult<u64> {
    predicate.validate_for::<E>()?;
    let filter = to_sql(predicate, config.case_sensitive);
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", E::TABLE, filter.sql);
    let total: i64 = conn.query_row(
        &sql,
        params_from_iter(filter.params.iter().map(bind_value)),
        |row| row.get(0),
    )?;
    Ok(u64::try_from(total).unwrap_or_default())
}

/// Deletes matching rows of `E` only; related rows are left untouched.
pub(crate) fn delete_where<E: Entity>(
    conn: &Connection,
    predicate: &Predicate,
    config: &QueryConfig,
) -> RepoResult<usize> {
    predicate.validate_for::<E>()?;
    let filter = to_sql(predicate, config.case_sensitive);
    let sql = format!("DELETE FROM {} WHERE {}", E::TABLE, filter.sql);
    let changed = conn.execute(&sql, params_from_iter(filter.params.iter().map(bind_value)))?;

    debug!(
        "event=query_delete module=repo status=ok entity={} rows={}",
        E::TABLE,
        changed
    );
    Ok(changed)
}

/// Sets `field = value` on matching rows of `E`.
pub(crate) fn update_where<E: Entity>(
    conn: &Connection,
    field: Field,
    value: &Value,
    predicate: &Predicate,
    config: &QueryConfig,
) -> RepoResult<usize> {
    check_field::<E>(&field)?;
    if matches!(value.kind(), Some(kind) if kind != field.kind) {
        return Err(PredicateError::TypeMismatch {
            field,
            found: value.type_name(),
        }
        .into());
    }
    predicate.validate_for::<E>()?;

    let filter = to_sql(predicate, config.case_sensitive);
    let sql = format!(
        "UPDATE {} SET {} = ? WHERE {}",
        E::TABLE,
        field.name,
        filter.sql
    );
    let bind_values = std::iter::once(bind_value(value)).chain(filter.params.iter().map(bind_value));
    let changed = conn.execute(&sql, params_from_iter(bind_values))?;

    debug!(
        "event=query_update module=repo status=ok entity={} field={} rows={}",
        E::TABLE,
        field.name,
        changed
    );
    Ok(changed)
}

pub(crate) fn bind_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(number) => SqlValue::Integer(*number),
        Value::Text(text) => SqlValue::Text(text.clone()),
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
