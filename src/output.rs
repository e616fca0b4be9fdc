//! CSV output.

use std::io::Write;

use anyhow::{Result, bail};
use drought_series::NaiveDate;

/// Text for a missing value.
const MISSING: &str = "NA";

/// Formats a value with six decimals, or [`MISSING`].
pub fn format_value(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{x:.6}"),
        None => MISSING.to_string(),
    }
}

/// Writes aligned columns as CSV. The first column is the date when
/// `dates` is given and the 1-based step number otherwise.
pub fn write_columns<W: Write>(
    out: W,
    dates: Option<&[NaiveDate]>,
    columns: &[(String, Vec<Option<f64>>)],
) -> Result<()> {
    let n = columns.first().map_or(0, |(_, c)| c.len());
    if let Some((name, _)) = columns.iter().find(|(_, c)| c.len() != n) {
        bail!("column {name:?} is not aligned with the others");
    }
    if dates.is_some_and(|d| d.len() != n) {
        bail!("dates are not aligned with the columns");
    }

    let mut wtr = csv::Writer::from_writer(out);
    let key = if dates.is_some() { "date" } else { "step" };
    wtr.write_record(std::iter::once(key).chain(columns.iter().map(|(name, _)| name.as_str())))?;

    for i in 0..n {
        let first = match dates {
            Some(d) => d[i].to_string(),
            None => (i + 1).to_string(),
        };
        wtr.write_record(
            std::iter::once(first).chain(columns.iter().map(|(_, c)| format_value(c[i]))),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
