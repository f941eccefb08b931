use std::path::Path;

use anyhow::{bail, Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use super::model::{CellValue, Dataset};

/// Table read when a database file is opened without naming one.
pub const OBSERVATION_TABLE: &str = "Observation";

// ---------------------------------------------------------------------------
// DataSource – the seam to whatever supplies (columns, rows)
// ---------------------------------------------------------------------------

/// Supplies a complete dataset. Implementations own the I/O; the table
/// component only ever sees the fully-fetched result.
pub trait DataSource {
    fn fetch(&mut self) -> Result<Dataset>;
}

/// Reads every row of one table from a caller-supplied SQLite connection.
pub struct SqliteSource<'c> {
    conn: &'c Connection,
    table: String,
}

impl<'c> SqliteSource<'c> {
    pub fn new(conn: &'c Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
        }
    }

    /// Source over the default `Observation` table.
    pub fn observation(conn: &'c Connection) -> Self {
        Self::new(conn, OBSERVATION_TABLE)
    }
}

impl DataSource for SqliteSource<'_> {
    fn fetch(&mut self) -> Result<Dataset> {
        read_table(self.conn, &self.table)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.db` / `.sqlite` / `.sqlite3` – SQLite database, `Observation` table
/// * `.csv`                         – header row + one record per row
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "db" | "sqlite" | "sqlite3" => load_sqlite(path, OBSERVATION_TABLE),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// SQLite loader
// ---------------------------------------------------------------------------

/// Open a database file and read one table wholesale.
pub fn load_sqlite(path: &Path, table: &str) -> Result<Dataset> {
    let conn = Connection::open(path)
        .with_context(|| format!("opening database {}", path.display()))?;
    read_table(&conn, table)
}

/// `SELECT * FROM <table>` into a [`Dataset`], mapping SQLite storage
/// classes onto [`CellValue`].
pub fn read_table(conn: &Connection, table: &str) -> Result<Dataset> {
    // Table names cannot be bound as parameters; quote the identifier.
    let sql = format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""));
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("querying table {table:?}"))?;

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let n_cols = columns.len();

    let mut out = Vec::new();
    let mut rows = stmt.query([]).context("executing query")?;
    while let Some(row) = rows.next().context("reading row")? {
        let mut values = Vec::with_capacity(n_cols);
        for i in 0..n_cols {
            values.push(cell_from_sqlite(row.get_ref(i)?));
        }
        out.push(values);
    }

    log::info!("loaded {} rows from table {table:?}", out.len());
    Ok(Dataset::new(columns, out)?)
}

fn cell_from_sqlite(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Integer(i),
        ValueRef::Real(f) => CellValue::Float(f),
        ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => CellValue::Text(format!("<blob {} bytes>", b.len())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell type-guessed
/// (integer, then float, then bool, else text; empty → null).
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut out = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        out.push(record.iter().map(guess_cell).collect());
    }

    log::info!("loaded {} rows from {}", out.len(), path.display());
    Ok(Dataset::new(columns, out)?)
}

fn guess_cell(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}
