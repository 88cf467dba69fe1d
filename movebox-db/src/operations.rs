//! Generic row operations over any record table.
//!
//! Table and column names come from the static schema catalog and are
//! quoted on the way into SQL; values are always bound as parameters.

use movebox_model::{Record, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, ErrorCode, OptionalExtension};

use crate::error::StoreError;
use crate::schema::TableSchema;

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub(crate) fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(n) => SqlValue::Integer(*n),
        Value::Text(s) => SqlValue::Text(s.clone()),
    }
}

pub(crate) fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(f) => Value::Text(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
    }
}

/// Column list selected for a table, in catalog order.
fn column_list(schema: &TableSchema) -> String {
    schema
        .columns
        .iter()
        .map(|c| quote(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_record(schema: &TableSchema, row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
    let mut record = Record::new();
    for (i, col) in schema.columns.iter().enumerate() {
        record.insert(col.name, from_sql(row.get_ref(i)?));
    }
    Ok(record)
}

/// Translate a constraint failure on insert/update into a store error.
///
/// Uniqueness violations name the offending column in SQLite's message
/// (`UNIQUE constraint failed: table.column`).
fn map_write_error(schema: &TableSchema, data: &Record, err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(ref e, Some(ref msg)) = err {
        if e.code == ErrorCode::ConstraintViolation {
            if let Some(spec) = msg.strip_prefix("UNIQUE constraint failed: ") {
                let column = spec
                    .split(',')
                    .next()
                    .and_then(|c| c.trim().rsplit('.').next())
                    .unwrap_or(spec)
                    .to_string();
                let value = data.get(&column).map(Value::to_string).unwrap_or_default();
                return StoreError::DuplicateKeyConflict {
                    table: schema.table.to_string(),
                    column,
                    value,
                };
            }
        }
    }
    err.into()
}

// ── Writes ──────────────────────────────────────────────────────────────────

/// Insert a row and return its rowid.
pub fn insert_record(conn: &Connection, schema: &TableSchema, data: &Record) -> Result<i64, StoreError> {
    if data.is_empty() {
        return Err(StoreError::empty_record(schema.table));
    }
    let columns: Vec<String> = data.keys().map(quote).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(schema.table),
        columns.join(", "),
        placeholders.join(", ")
    );
    log::debug!("{sql}");
    conn.execute(&sql, params_from_iter(data.iter().map(|(_, v)| to_sql(v))))
        .map_err(|e| map_write_error(schema, data, e))?;
    Ok(conn.last_insert_rowid())
}

/// Update the given columns of one row. Returns the number of rows matched.
pub fn update_record(
    conn: &Connection,
    schema: &TableSchema,
    id: i64,
    data: &Record,
) -> Result<usize, StoreError> {
    if data.is_empty() {
        return Err(StoreError::empty_record(schema.table));
    }
    let assignments: Vec<String> = data
        .keys()
        .enumerate()
        .map(|(i, k)| format!("{} = ?{}", quote(k), i + 1))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        quote(schema.table),
        assignments.join(", "),
        schema.key_column,
        data.len() + 1
    );
    log::debug!("{sql}");
    let params = data
        .iter()
        .map(|(_, v)| to_sql(v))
        .chain(std::iter::once(SqlValue::Integer(id)));
    conn.execute(&sql, params_from_iter(params))
        .map_err(|e| map_write_error(schema, data, e))
}

/// Delete one row. Returns the number of rows removed.
///
/// Rows still referenced through a foreign key are left in place and
/// reported as [`StoreError::StillReferenced`].
pub fn delete_record(conn: &Connection, schema: &TableSchema, id: i64) -> Result<usize, StoreError> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?1",
        quote(schema.table),
        schema.key_column
    );
    log::debug!("{sql}");
    conn.execute(&sql, [id]).map_err(|e| match e {
        rusqlite::Error::SqliteFailure(ref f, _) if f.code == ErrorCode::ConstraintViolation => {
            StoreError::StillReferenced {
                table: schema.table.to_string(),
                id,
            }
        }
        other => other.into(),
    })
}

// ── Reads ───────────────────────────────────────────────────────────────────

/// Fetch one row by key.
pub fn select_record(
    conn: &Connection,
    schema: &TableSchema,
    id: i64,
) -> Result<Option<Record>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        column_list(schema),
        quote(schema.table),
        schema.key_column
    );
    log::debug!("{sql}");
    conn.query_row(&sql, [id], |row| row_to_record(schema, row))
        .optional()
        .map_err(Into::into)
}

/// All rows of a table, ordered by key.
pub fn list_records(conn: &Connection, schema: &TableSchema) -> Result<Vec<Record>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(schema),
        quote(schema.table),
        schema.key_column
    );
    log::debug!("{sql}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| row_to_record(schema, row))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Whether a row with the given key exists.
pub fn record_exists(conn: &Connection, schema: &TableSchema, id: i64) -> Result<bool, StoreError> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1)",
        quote(schema.table),
        schema.key_column
    );
    let exists: bool = conn.query_row(&sql, [id], |row| row.get(0))?;
    Ok(exists)
}

/// Key of the first row whose `column` equals `value` exactly.
pub fn find_id_by_column(
    conn: &Connection,
    schema: &TableSchema,
    column: &str,
    value: &Value,
) -> Result<Option<i64>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1 ORDER BY {} LIMIT 1",
        schema.key_column,
        quote(schema.table),
        quote(column),
        schema.key_column
    );
    log::debug!("{sql}");
    let result = conn.query_row(&sql, [to_sql(value)], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Number of rows in a table.
pub fn count_records(conn: &Connection, schema: &TableSchema) -> Result<i64, StoreError> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote(schema.table));
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}
