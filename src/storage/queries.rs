use crate::error::Result;
use crate::storage::models::SessionRecord;
use crate::timeline::Segment;
use rusqlite::{params, Connection};

// Session queries

pub fn insert_session(conn: &Connection, record: &SessionRecord) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO sessions (id, created_at, updated_at, source_name, duration_seconds, sync_offset, waveform)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            record.id,
            record.created_at,
            record.updated_at,
            record.source_name,
            record.duration_seconds,
            record.sync_offset,
            serde_json::to_string(&record.waveform)?,
        ],
    )?;

    insert_segments(conn, &record.id, &record.segments)?;
    Ok(())
}

pub fn get_session(conn: &Connection, id: &str) -> Result<Option<SessionRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, created_at, updated_at, source_name, duration_seconds, sync_offset, waveform
        FROM sessions
        WHERE id = ?1
        "#,
    )?;

    let record = stmt.query_row([id], map_session_row);

    match record {
        Ok(mut r) => {
            r.segments = get_segments(conn, &r.id)?;
            Ok(Some(r))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_sessions(conn: &Connection) -> Result<Vec<SessionRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, created_at, updated_at, source_name, duration_seconds, sync_offset, waveform
        FROM sessions
        ORDER BY created_at DESC
        "#,
    )?;

    let rows = stmt.query_map([], map_session_row)?;

    let mut records = Vec::new();
    for row in rows {
        let mut r = row?;
        r.segments = get_segments(conn, &r.id)?;
        records.push(r);
    }

    Ok(records)
}

/// Replace the stored caption list for a session with its current state
pub fn replace_segments(conn: &Connection, session_id: &str, segments: &[Segment]) -> Result<()> {
    conn.execute("DELETE FROM segments WHERE session_id = ?1", [session_id])?;
    insert_segments(conn, session_id, segments)?;

    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "UPDATE sessions SET updated_at = ?1 WHERE id = ?2",
        params![now, session_id],
    )?;
    Ok(())
}

pub fn update_sync_offset(conn: &Connection, session_id: &str, sync_offset: f64) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "UPDATE sessions SET sync_offset = ?1, updated_at = ?2 WHERE id = ?3",
        params![sync_offset, now, session_id],
    )?;
    Ok(())
}

pub fn delete_session(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM segments WHERE session_id = ?1", [id])?;
    conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    Ok(())
}

fn insert_segments(conn: &Connection, session_id: &str, segments: &[Segment]) -> Result<()> {
    for seg in segments {
        conn.execute(
            r#"
            INSERT INTO segments (id, session_id, start_seconds, end_seconds, text, confidence)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![seg.id, session_id, seg.start, seg.end, seg.text, seg.confidence],
        )?;
    }
    Ok(())
}

fn get_segments(conn: &Connection, session_id: &str) -> Result<Vec<Segment>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, start_seconds, end_seconds, text, confidence
        FROM segments
        WHERE session_id = ?1
        ORDER BY start_seconds
        "#,
    )?;

    let rows = stmt.query_map([session_id], |row| {
        Ok(Segment {
            id: row.get(0)?,
            start: row.get(1)?,
            end: row.get(2)?,
            text: row.get(3)?,
            confidence: row.get(4)?,
        })
    })?;

    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

fn map_session_row(row: &rusqlite::Row<'_>) -> std::result::Result<SessionRecord, rusqlite::Error> {
    let waveform_json: String = row.get(6)?;
    Ok(SessionRecord {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        source_name: row.get(3)?,
        duration_seconds: row.get(4)?,
        sync_offset: row.get(5)?,
        waveform: serde_json::from_str(&waveform_json).unwrap_or_default(),
        segments: vec![],
    })
}
