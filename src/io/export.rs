//! CSV export for hourly forecasts.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::Forecast;

/// Column header for CSV forecast export.
const HEADER: [&str; 3] = ["hour", "time", "power_kw"];

/// Exports a forecast to a CSV file at the given path.
///
/// Writes a header row followed by one row per hour in ascending order.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(forecast: &Forecast, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(forecast, buf)
}

/// Writes a forecast as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(forecast: &Forecast, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;
    for p in forecast {
        wtr.write_record(&[
            p.hour.to_string(),
            p.label(),
            format!("{:.2}", p.power_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CurveSimulator, FixedNoise, ModelVariant, PanelConfig};

    fn forecast() -> Forecast {
        let cfg = PanelConfig {
            latitude: 40.7128,
            longitude: -74.006,
            capacity_kw: 5.0,
            tilt_deg: 20.0,
            azimuth_deg: 180.0,
            model: ModelVariant::Physics,
        };
        CurveSimulator
            .simulate(&cfg, &mut FixedNoise::midpoint())
            .expect("valid config")
    }

    #[test]
    fn header_and_row_count() {
        let mut buf = Vec::new();
        write_csv(&forecast(), &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.first().copied(), Some("hour,time,power_kw"));
        // 1 header + 24 data rows
        assert_eq!(lines.len(), 25);
    }

    #[test]
    fn noon_row_is_rendered() {
        let mut buf = Vec::new();
        write_csv(&forecast(), &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        assert!(output.lines().any(|l| l == "12,12:00,5.00"));
    }

    #[test]
    fn rows_parse_back() {
        let mut buf = Vec::new();
        write_csv(&forecast(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let mut hours = Vec::new();
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            hours.push(rec[0].parse::<u8>().expect("hour column"));
            assert!(rec[2].parse::<f64>().is_ok(), "power column should parse");
        }
        assert_eq!(hours, (0..24).collect::<Vec<u8>>());
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("forecast.csv");
        export_csv(&forecast(), &path).expect("export succeeds");
        let written = std::fs::read_to_string(&path).expect("file readable");
        assert!(written.starts_with("hour,time,power_kw"));
        assert_eq!(written.lines().count(), 25);
    }
}
