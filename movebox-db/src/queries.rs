//! Read queries that join across tables: label data, sign data, and the
//! SQL text dump.

use std::fmt::Write as _;

use movebox_model::{BoxLabelData, RecordKind, RoomSignData};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};

use crate::error::StoreError;
use crate::operations;
use crate::schema::table_schema;

// ── Labels ──────────────────────────────────────────────────────────────────

/// Everything printed on the label of one box.
pub fn box_label_data(conn: &Connection, box_id: i64) -> Result<BoxLabelData, StoreError> {
    let boxes = table_schema(RecordKind::MovingBox);
    if !operations::record_exists(conn, boxes, box_id)? {
        return Err(StoreError::not_found(boxes.table, box_id));
    }

    let result = conn.query_row(
        "SELECT moving_box.id, room.name, room.color, uri_user.name, move_project.found_contact
         FROM moving_box
         JOIN room ON moving_box.room = room.id
         JOIN uri_user ON moving_box.user = uri_user.id
         JOIN move_project ON move_project.rowid = 1
         WHERE moving_box.id = ?1",
        params![box_id],
        |row| {
            Ok(BoxLabelData {
                box_id: row.get(0)?,
                room: row.get(1)?,
                color: row.get(2)?,
                user: row.get(3)?,
                found: row.get(4)?,
            })
        },
    );
    match result {
        Ok(data) => Ok(data),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::ProjectMissing),
        Err(e) => Err(e.into()),
    }
}

/// Everything printed on a room's destination sign.
pub fn room_sign_data(conn: &Connection, room_id: i64) -> Result<RoomSignData, StoreError> {
    let rooms = table_schema(RecordKind::Room);
    if !operations::record_exists(conn, rooms, room_id)? {
        return Err(StoreError::not_found(rooms.table, room_id));
    }

    let result = conn.query_row(
        "SELECT room.name, room.color, move_project.title
         FROM room
         JOIN move_project ON move_project.rowid = 1
         WHERE room.id = ?1",
        params![room_id],
        |row| {
            Ok(RoomSignData {
                room: row.get(0)?,
                color: row.get(1)?,
                title: row.get(2)?,
            })
        },
    );
    match result {
        Ok(data) => Ok(data),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::ProjectMissing),
        Err(e) => Err(e.into()),
    }
}

// ── Dump ────────────────────────────────────────────────────────────────────

/// The whole database as SQL text: table definitions, their rows as
/// `INSERT` statements, then indexes, wrapped in one transaction.
pub fn dump(conn: &Connection) -> Result<String, StoreError> {
    let mut out = String::from("BEGIN TRANSACTION;\n");

    let mut stmt = conn.prepare(
        "SELECT name, sql FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND sql IS NOT NULL
         ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    for (name, sql) in &tables {
        let _ = writeln!(out, "{sql};");
        let quoted = format!("\"{}\"", name.replace('"', "\"\""));
        let mut rows = conn.prepare(&format!("SELECT * FROM {quoted}"))?;
        let width = rows.column_count();
        let mut cursor = rows.query([])?;
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(sql_literal(row.get_ref(i)?));
            }
            let _ = writeln!(out, "INSERT INTO {quoted} VALUES({});", values.join(","));
        }
    }

    let mut stmt = conn.prepare(
        "SELECT sql FROM sqlite_master
         WHERE type IN ('index', 'trigger', 'view') AND sql IS NOT NULL
         ORDER BY name",
    )?;
    let others = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for sql in others {
        let _ = writeln!(out, "{sql};");
    }

    out.push_str("COMMIT;\n");
    Ok(out)
}

fn sql_literal(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => format!("'{}'", String::from_utf8_lossy(t).replace('\'', "''")),
        ValueRef::Blob(b) => {
            let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
            format!("X'{hex}'")
        }
    }
}
