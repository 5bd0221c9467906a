use rusqlite::{params, Connection, Result};

pub fn upsert_document(conn: &Connection, collection: &str, id: &str, body_json: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO documents (collection, id, body_json)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(collection, id) DO UPDATE SET
            body_json = excluded.body_json",
        params![collection, id, body_json],
    )?;
    Ok(())
}

pub fn find_document(conn: &Connection, collection: &str, id: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT body_json
         FROM documents
         WHERE collection = ?1 AND id = ?2",
    )?;
    let mut rows = stmt.query(params![collection, id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(row.get(0)?));
    }
    Ok(None)
}

pub fn count_documents(conn: &Connection, collection: &str) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE collection = ?1",
        params![collection],
        |row| row.get(0),
    )
}
