//! CSV writers for candidate rows and canonical matches.

use std::collections::BTreeMap;
use std::io;

use csv::Writer;
use linksight_match::CanonicalMatch;
use linksight_model::{Hierarchy, MatchRow, ReferenceTable};

/// Ancestor code columns to emit: hierarchy order first, then any others.
pub fn code_columns(hierarchy: &Hierarchy, reference: &ReferenceTable) -> Vec<String> {
    let mut columns: Vec<String> = hierarchy
        .levels()
        .iter()
        .map(|level| level.code_column())
        .filter(|column| reference.has_code_column(column))
        .collect();
    for column in reference.code_columns() {
        if !columns.contains(column) {
            columns.push(column.clone());
        }
    }
    columns
}

fn header(leading: &[&str], code_columns: &[String]) -> Vec<String> {
    leading
        .iter()
        .map(|s| (*s).to_string())
        .chain(code_columns.iter().cloned())
        .chain(std::iter::once("score".to_string()))
        .collect()
}

fn codes<'a>(
    ancestor_codes: &'a BTreeMap<String, String>,
    code_columns: &'a [String],
) -> impl Iterator<Item = String> + 'a {
    code_columns
        .iter()
        .map(|column| ancestor_codes.get(column).cloned().unwrap_or_default())
}

fn score(score: Option<u8>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}

/// Writes `record_id,level,origin,code,interlevel,location,<code columns>,score`.
pub fn write_candidates<W: io::Write>(
    writer: W,
    code_columns: &[String],
    rows: &[MatchRow],
) -> csv::Result<()> {
    let mut out = Writer::from_writer(writer);
    out.write_record(header(
        &["record_id", "level", "origin", "code", "interlevel", "location"],
        code_columns,
    ))?;
    for row in rows {
        let c = &row.candidate;
        let mut record = vec![
            row.record_id.to_string(),
            c.level.clone(),
            c.origin.to_string(),
            c.code.clone().unwrap_or_default(),
            c.interlevel.clone(),
            c.location.clone().unwrap_or_default(),
        ];
        record.extend(codes(&c.ancestor_codes, code_columns));
        record.push(score(c.score));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes `record_id,level,code,interlevel,location,<code columns>,score`.
pub fn write_canonical<W: io::Write>(
    writer: W,
    code_columns: &[String],
    matches: &[CanonicalMatch],
) -> csv::Result<()> {
    let mut out = Writer::from_writer(writer);
    out.write_record(header(
        &["record_id", "level", "code", "interlevel", "location"],
        code_columns,
    ))?;
    for m in matches {
        let mut record = vec![
            m.record_id.to_string(),
            m.level.clone(),
            m.code.clone(),
            m.interlevel.clone(),
            m.location.clone().unwrap_or_default(),
        ];
        record.extend(codes(&m.ancestor_codes, code_columns));
        record.push(score(m.score));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}
