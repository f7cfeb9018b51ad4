use anyhow::Result;
use regex::Regex;

use crate::session::Session;

/// Best-effort row count: run SELECT COUNT(*) and pull the first number out
/// of the result markup. A count of 0 and an unparseable response both come
/// back as the same thing to the caller only via wording, so None here means
/// "could not read", not "empty table".
pub fn table_count(session: &Session, db: &str, table: &str) -> Result<Option<u64>> {
    let sql = format!("SELECT COUNT(*) as cnt FROM {table}");
    let body = session.raw_query(&sql, db)?;
    Ok(first_count(&body)?)
}

/// Row count scoped to result-table cells. The import result page carries
/// digits in its surrounding markup (query counts, pagination), so the count
/// must come from a td cell rather than the first number anywhere.
pub fn table_cell_count(session: &Session, db: &str, table: &str) -> Result<Option<u64>> {
    let sql = format!("SELECT COUNT(*) as cnt FROM {table}");
    let body = session.raw_query(&sql, db)?;
    Ok(td_count(&body)?)
}

/// Run SHOW TABLES and collect the identifier-looking cell values. When
/// `expected` is given only those names are kept (the import flow checks for
/// the four known tables and nothing else).
pub fn list_tables(session: &Session, db: &str, expected: Option<&[&str]>) -> Result<Vec<String>> {
    let body = session.raw_query("SHOW TABLES", db)?;
    let names = table_cells(&body)?;
    Ok(match expected {
        Some(want) => names.into_iter().filter(|n| want.contains(&n.as_str())).collect(),
        None => names,
    })
}

pub fn first_count(html: &str) -> Result<Option<u64>> {
    let re = Regex::new(r">(\d+)<")?;
    Ok(re.captures(html).and_then(|c| c[1].parse().ok()))
}

pub fn td_count(html: &str) -> Result<Option<u64>> {
    let re = Regex::new(r"<td[^>]*>\s*(\d+)\s*</td>")?;
    Ok(re.captures(html).and_then(|c| c[1].parse().ok()))
}

pub fn table_cells(html: &str) -> Result<Vec<String>> {
    let re = Regex::new(r"<td[^>]*>\s*(\w+)\s*</td>")?;
    Ok(re.captures_iter(html).map(|c| c[1].to_string()).collect())
}
