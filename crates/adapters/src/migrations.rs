pub const MIGRATIONS: &[&str] = &["CREATE TABLE IF NOT EXISTS documents (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        body_json TEXT NOT NULL,
        PRIMARY KEY (collection, id)
    );"];
