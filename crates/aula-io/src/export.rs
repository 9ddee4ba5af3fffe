//! Export formats for analysis results.
//!
//! - Parameter tables as CSV (one row per parameter, one column per band)
//!   or JSON (one record per band)
//! - Intermediate decay curves and fitted lines of one band as CSV, for an
//!   external plotter

use crate::Result;
use aula_analysis::{BandId, DecayAnalysis, DecayWindow, Parameter, ParameterTable};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_default()
}

/// Write `table` as CSV.
///
/// Layout:
///
/// ```text
/// parameter,broadband,31.5 Hz,63 Hz,...
/// EDT,1.234567,,0.987654,...
/// ...
/// status,ok,failed,ok,...
/// ```
///
/// Cells of failed bands and unavailable ratios are empty.
pub fn write_table_csv<W: Write>(mut writer: W, table: &ParameterTable) -> std::io::Result<()> {
    let header: Vec<String> = table.bands().map(|b| b.to_string()).collect();
    writeln!(writer, "parameter,{}", header.join(","))?;

    for parameter in Parameter::ALL {
        let cells: Vec<String> = table.row(parameter).into_iter().map(cell).collect();
        writeln!(writer, "{},{}", parameter.label(), cells.join(","))?;
    }

    let status: Vec<&str> = table
        .entries()
        .iter()
        .map(|e| if e.outcome.is_ok() { "ok" } else { "failed" })
        .collect();
    writeln!(writer, "status,{}", status.join(","))?;
    Ok(())
}

/// Write `table` as CSV to `path`.
pub fn export_table_csv(table: &ParameterTable, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_table_csv(&mut writer, table)?;
    writer.flush()?;
    Ok(())
}

/// One band of a parameter table in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRecord {
    /// Band label (`broadband` or `<center> Hz`).
    pub band: String,
    /// Nominal center in Hz, absent for broadband.
    pub center_hz: Option<f64>,
    /// Early decay time in seconds.
    pub edt: Option<f64>,
    /// T10 in seconds.
    pub t10: Option<f64>,
    /// T20 in seconds.
    pub t20: Option<f64>,
    /// T30 in seconds.
    pub t30: Option<f64>,
    /// Clarity in dB.
    pub c80: Option<f64>,
    /// Definition as a fraction.
    pub d50: Option<f64>,
    /// Failure message when the band could not be estimated.
    pub error: Option<String>,
}

/// Records for every band of `table`, in table order.
pub fn table_records(table: &ParameterTable) -> Vec<BandRecord> {
    table
        .entries()
        .iter()
        .map(|entry| {
            let summary = entry.outcome.as_ref().ok();
            let value = |p: Parameter| summary.and_then(|s| s.value(p));
            BandRecord {
                band: entry.band.to_string(),
                center_hz: entry.band.center_hz(),
                edt: value(Parameter::Edt),
                t10: value(Parameter::T10),
                t20: value(Parameter::T20),
                t30: value(Parameter::T30),
                c80: value(Parameter::C80),
                d50: value(Parameter::D50),
                error: entry.outcome.as_ref().err().map(ToString::to_string),
            }
        })
        .collect()
}

/// Write `table` as a pretty-printed JSON array of [`BandRecord`]s.
pub fn export_table_json(table: &ParameterTable, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &table_records(table))?;
    writer.flush()?;
    Ok(())
}

/// Write the curves of one analysis as CSV.
///
/// Columns: `time_s`, `signal_db`, `smoothed_db` on the signal's time axis,
/// then `edc_time_s`, `edc_db` and the five fitted lines on the Schroeder
/// curve's axis. The Schroeder columns are empty past the integration
/// limit; each window line is only filled inside its own window.
pub fn write_curves_csv<W: Write>(mut writer: W, analysis: &DecayAnalysis) -> std::io::Result<()> {
    let curves = &analysis.curves;
    let fits = &analysis.fits;

    write!(writer, "time_s,signal_db,smoothed_db,edc_time_s,edc_db,fit_overall_db")?;
    for window in DecayWindow::ALL {
        write!(writer, ",fit_{}_db", window.label().to_lowercase())?;
    }
    writeln!(writer)?;

    let edc_time = curves.schroeder.time();
    let edc_db = curves.schroeder.level_db();

    for i in 0..curves.signal_db.len() {
        let t = curves.signal_db.time()[i];
        write!(
            writer,
            "{:.6},{:.6},{:.6}",
            t,
            curves.signal_db.level_db()[i],
            curves.smoothed_db.level_db()[i]
        )?;

        let edc_t = edc_time.get(i).copied();
        write!(
            writer,
            ",{},{},{}",
            cell(edc_t),
            cell(edc_db.get(i).copied()),
            cell(edc_t.map(|x| fits.overall.eval(x)))
        )?;

        for fit in &fits.windows {
            let value = edc_t.filter(|_| fit.range.contains(&i)).map(|x| fit.line.eval(x));
            write!(writer, ",{}", cell(value))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write the curves of one analysis as CSV to `path`.
pub fn export_curves_csv(analysis: &DecayAnalysis, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_curves_csv(&mut writer, analysis)?;
    writer.flush()?;
    Ok(())
}
