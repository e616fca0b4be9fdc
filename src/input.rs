//! Plain-text series and table readers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use drought_series::{NaiveDate, TimeSeries};

/// Reads a series file. See [`parse_series`] for the format.
pub fn read_series(path: &Path) -> Result<TimeSeries> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read series: {}", path.display()))?;
    parse_series(&text).with_context(|| format!("failed to parse series: {}", path.display()))
}

/// Parses one observation per line, either `value` or `YYYY-MM-DD,value`.
///
/// Fields may be quoted. Lines starting with `#` are comments and blank
/// lines are skipped. An empty value, `NaN` or `NA` is a missing
/// observation. Either every observation is dated or none is.
pub fn parse_series(text: &str) -> Result<TimeSeries> {
    let mut rdr = csv_reader(false).flexible(true).from_reader(text.as_bytes());
    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut dated = None;

    for result in rdr.records() {
        let record = result?;
        let lineno = line_of(&record);
        let (date, value) = match record.len() {
            1 => (None, &record[0]),
            2 => (Some(parse_date(&record[0], lineno)?), &record[1]),
            n => bail!("line {lineno}: expected 1 or 2 fields, got {n}"),
        };
        match (dated, date.is_some()) {
            (None, d) => dated = Some(d),
            (Some(expected), d) if expected != d => {
                bail!("line {lineno}: mixes dated and undated observations")
            }
            _ => {}
        }
        dates.extend(date);
        values.push(parse_value(value, lineno)?);
    }

    if dated == Some(true) {
        Ok(TimeSeries::with_timestamps(dates, values)?)
    } else {
        Ok(TimeSeries::new(values))
    }
}

/// Reads a CSV table with a header line; see [`parse_table`].
pub fn read_table(path: &Path, columns: &[&str]) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read table: {}", path.display()))?;
    parse_table(&text, columns).with_context(|| format!("failed to parse table: {}", path.display()))
}

/// Parses a CSV table whose header names at least `columns`, returning those
/// columns in the requested order. Every requested value must be present.
pub fn parse_table(text: &str, columns: &[&str]) -> Result<Vec<Vec<f64>>> {
    let mut rdr = csv_reader(true).from_reader(text.as_bytes());
    let names = rdr.headers()?.clone();
    if names.iter().all(str::is_empty) {
        bail!("table is empty");
    }
    let positions = columns
        .iter()
        .map(|c| {
            names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(c))
                .with_context(|| format!("header is missing column {c:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut out = vec![Vec::new(); columns.len()];
    for result in rdr.records() {
        let record = result?;
        let lineno = line_of(&record);
        for (col, &pos) in positions.iter().enumerate() {
            let value = parse_value(&record[pos], lineno)?.with_context(|| {
                format!("line {lineno}: missing value in column {:?}", columns[col])
            })?;
            out[col].push(value);
        }
    }
    Ok(out)
}

/// Reader settings shared by series and table files.
fn csv_reader(has_headers: bool) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .comment(Some(b'#'));
    builder
}

/// 1-based line number of a record.
fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn parse_date(s: &str, lineno: u64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("line {lineno}: invalid date {s:?}"))
}

fn parse_value(s: &str, lineno: u64) -> Result<Option<f64>> {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    let v: f64 = s
        .parse()
        .with_context(|| format!("line {lineno}: invalid value {s:?}"))?;
    Ok(v.is_finite().then_some(v))
}
