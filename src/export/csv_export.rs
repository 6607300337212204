use crate::error::ExportError;
use crate::models::AggregateResult;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::BufWriter;

const HEADERS: [&str; 5] = ["id", "name", "type", "score", "strategy"];

/// Write the merged results to `path`, one row per unique record.
pub fn export_to_csv(result: &AggregateResult, path: &str) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Csv(format!("{}: {}", path, e)))?;
    let buf_writer = BufWriter::with_capacity(64 * 1024, file);
    let mut w = WriterBuilder::new().from_writer(buf_writer);
    write_rows(&mut w, result)?;
    w.flush().map_err(|e| ExportError::Csv(e.to_string()))?;
    Ok(())
}

/// Same rows as [`export_to_csv`], to any writer.
pub fn write_csv<W: std::io::Write>(result: &AggregateResult, out: W) -> Result<(), ExportError> {
    let mut w = WriterBuilder::new().from_writer(out);
    write_rows(&mut w, result)?;
    w.flush().map_err(|e| ExportError::Csv(e.to_string()))?;
    Ok(())
}

fn write_rows<W: std::io::Write>(
    w: &mut Writer<W>,
    result: &AggregateResult,
) -> Result<(), ExportError> {
    w.write_record(HEADERS)
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    for m in &result.final_results {
        w.write_record([
            m.record.id.to_string(),
            m.record.name.clone(),
            m.record.record_type.clone(),
            format!("{:.1}", m.score.value()),
            m.strategy.to_string(),
        ])
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    Ok(())
}
