use crate::core::page::ProfileIndex;
use crate::core::projector::project;
use crate::domain::model::{ExportTable, FlatRow, Page};
use crate::utils::error::{ExportError, Result};
use crate::utils::file::write_atomic;
use std::path::Path;

/// Projects every follower of `pages`, in page order then element order.
/// Profiles are resolved against everything seen on this or earlier pages.
pub fn aggregate(pages: &[Page]) -> ExportTable {
    let mut profiles = ProfileIndex::new();
    let mut rows = Vec::new();

    for page in pages {
        let added = profiles.absorb(page);
        let elements = page.elements();
        tracing::debug!(
            "Page {}: {} profiles, {} follower elements",
            page.index,
            added,
            elements.len()
        );
        rows.extend(elements.iter().map(|e| project(&profiles.resolve(e))));
    }

    tracing::info!(
        "Total unique profiles: {}, follower rows: {}",
        profiles.len(),
        rows.len()
    );
    ExportTable::new(rows)
}

pub fn from_rows(rows: Vec<FlatRow>) -> ExportTable {
    ExportTable::new(rows)
}

pub fn render_csv(table: &ExportTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row.values())?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

/// Writes the table to `path`, replacing any existing file. The previous
/// file stays intact if writing fails.
pub fn write(table: &ExportTable, path: &Path) -> Result<()> {
    let data = render_csv(table)?;
    write_atomic(path, &data).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Successfully wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
