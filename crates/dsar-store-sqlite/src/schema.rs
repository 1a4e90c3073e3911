//! SQL schema for the DSAR SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never deleted. Only status and last_updated_at change, and only
-- through a status-guarded UPDATE.
CREATE TABLE IF NOT EXISTS data_requests (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    id              TEXT NOT NULL UNIQUE,
    request_type    TEXT NOT NULL
                    CHECK (request_type IN ('ACCESS', 'DELETE', 'CORRECT')),
    requester_id    TEXT NOT NULL CHECK (length(trim(requester_id)) > 0),
    notes           TEXT,
    status          TEXT NOT NULL
                    CHECK (status IN ('RECEIVED', 'IN_REVIEW', 'COMPLETED', 'REJECTED')),
    summary         TEXT NOT NULL CHECK (length(summary) > 0),
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC
    last_updated_at TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS data_requests_status_idx ON data_requests(status);
CREATE INDEX IF NOT EXISTS data_requests_type_idx   ON data_requests(request_type);

PRAGMA user_version = 1;
";
