//! The generate/check routine.
//!
//! Processes the three configured reference tables through the pipeline and
//! emitter. `check` runs the exact same processing as `generate` and differs
//! only in skipping the artifact writes, so a clean check means a clean
//! generate.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::display::{Message, MessageType};
use crate::cli::routines::{RoutineFailure, RoutineSuccess};
use crate::generator::pipeline::{process_table_file, ProcessedTable, TableOptions};
use crate::generator::rust_source;
use crate::generator::tables::TableError;
use crate::project::{ProjectConfig, TableConfig};
use crate::utilities::constants::{
    FUNCTIONAL_GROUPS_FILE, LIPID_CLASSES_FILE, TRIVIAL_NAMES_FILE,
};
use crate::utilities::write_if_changed;

struct TableRun {
    artifact: String,
    file_name: &'static str,
    records: usize,
}

pub fn run(config: &ProjectConfig, write: bool) -> Result<RoutineSuccess, RoutineFailure> {
    let action = if write { "Generate" } else { "Check" };

    let runs = [
        process_one(
            action,
            "lipid_classes",
            &config.tables.lipid_classes,
            LIPID_CLASSES_FILE,
            rust_source::generate_lipid_classes,
        )?,
        process_one(
            action,
            "trivial_names",
            &config.tables.trivial_names,
            TRIVIAL_NAMES_FILE,
            rust_source::generate_trivial_names,
        )?,
        process_one(
            action,
            "functional_groups",
            &config.tables.functional_groups,
            FUNCTIONAL_GROUPS_FILE,
            rust_source::generate_functional_groups,
        )?,
    ];

    if write {
        write_artifacts(&config.output_dir, &runs)
            .map_err(|e| failure(action, format!("{e:#}")))?;
    }

    let total: usize = runs.iter().map(|r| r.records).sum();
    let details = format!(
        "{} records across {} tables{}",
        total,
        runs.len(),
        if write { "" } else { " (nothing written)" }
    );
    Ok(RoutineSuccess::success(Message::new(
        action.to_string(),
        details,
    )))
}

fn process_one(
    action: &str,
    table_name: &str,
    table_config: &TableConfig,
    file_name: &'static str,
    emit: fn(&ProcessedTable, &TableOptions, &str) -> Result<String, TableError>,
) -> Result<TableRun, RoutineFailure> {
    let options = table_config
        .table_options(table_name)
        .map_err(|e| failure(action, e.to_string()))?;

    let table = process_table_file(&table_config.path, &options).map_err(|e| {
        failure(
            action,
            format!("{table_name} ({}): {e}", table_config.path.display()),
        )
    })?;

    let source_name = table_config
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| table_config.path.display().to_string());
    let artifact = emit(&table, &options, &source_name)
        .map_err(|e| failure(action, format!("{table_name}: {e}")))?;

    info!(
        table = table_name,
        records = table.records.len(),
        identifiers = table.registry.len(),
        "processed table"
    );
    show_message!(
        MessageType::Info,
        Message::new(
            action.to_string(),
            format!("{table_name}: {} records", table.records.len())
        )
    );
    Ok(TableRun {
        artifact,
        file_name,
        records: table.records.len(),
    })
}

fn write_artifacts(output_dir: &Path, runs: &[TableRun]) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;
    for run in runs {
        let path = output_dir.join(run.file_name);
        let written = write_if_changed(&path, &run.artifact)
            .with_context(|| format!("failed to write artifact {}", path.display()))?;
        info!(
            artifact = %path.display(),
            written,
            "artifact {}",
            if written { "written" } else { "unchanged" }
        );
    }
    Ok(())
}

fn failure(action: &str, details: String) -> RoutineFailure {
    RoutineFailure::error(Message::new(action.to_string(), details))
}
