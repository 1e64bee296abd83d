//! Flattened tabular reports of a model.
//!
//! Multi-valued fields are joined with `;`. Reference lists become one
//! `reference_<database>` column per database seen anywhere in the
//! collection, in first-seen order.

use std::path::Path;

use indexmap::IndexSet;

use crate::error::{CurationError, Result};
use crate::input::DataTable;
use crate::model::{EntityKind, EntityStore, References};

const REPORT_DELIMITER: u8 = b'\t';
const VALUE_SEPARATOR: &str = ";";

/// Compartment identifiers and names.
pub fn compartments_table(store: &EntityStore) -> DataTable {
    let rows = store
        .compartments
        .values()
        .map(|c| vec![c.identifier.clone(), c.name.clone()])
        .collect();
    DataTable::new(headers(&["identifier", "name"], &IndexSet::new()), rows, REPORT_DELIMITER)
}

/// Process identifiers and names.
pub fn processes_table(store: &EntityStore) -> DataTable {
    let rows = store
        .processes
        .values()
        .map(|p| vec![p.identifier.clone(), p.name.clone()])
        .collect();
    DataTable::new(headers(&["identifier", "name"], &IndexSet::new()), rows, REPORT_DELIMITER)
}

/// One row per metabolite.
pub fn metabolites_table(store: &EntityStore) -> DataTable {
    let databases = databases(store.metabolites.values().map(|m| &m.references));

    let rows = store
        .metabolites
        .values()
        .map(|metabolite| {
            let mut row = vec![
                metabolite.identifier.clone(),
                metabolite.name.clone(),
                metabolite.formula.clone(),
                metabolite.mass.clone(),
                metabolite.charge.clone(),
            ];
            row.extend(reference_cells(&metabolite.references, &databases));
            row
        })
        .collect();

    DataTable::new(
        headers(&["identifier", "name", "formula", "mass", "charge"], &databases),
        rows,
        REPORT_DELIMITER,
    )
}

/// One row per reaction.
pub fn reactions_table(store: &EntityStore) -> DataTable {
    let databases = databases(store.reactions.values().map(|r| &r.references));

    let rows = store
        .reactions
        .values()
        .map(|reaction| {
            let mut row = vec![
                reaction.identifier.clone(),
                reaction.name.clone(),
                reaction.equation.clone(),
                join(reaction.metabolites()),
                join(reaction.compartments()),
                join(reaction.processes.iter()),
                reaction.reversibility.to_string(),
                reaction.conversion.to_string(),
                reaction.dispersal.to_string(),
                reaction.transport.to_string(),
                reaction.replication.to_string(),
                join(reaction.replicates.iter()),
            ];
            row.extend(reference_cells(&reaction.references, &databases));
            row
        })
        .collect();

    DataTable::new(
        headers(
            &[
                "identifier",
                "name",
                "equation",
                "metabolites",
                "compartments",
                "processes",
                "reversibility",
                "conversion",
                "dispersal",
                "transport",
                "replication",
                "replicates",
            ],
            &databases,
        ),
        rows,
        REPORT_DELIMITER,
    )
}

/// Report table for one collection.
pub fn table(store: &EntityStore, kind: EntityKind) -> DataTable {
    match kind {
        EntityKind::Compartment => compartments_table(store),
        EntityKind::Process => processes_table(store),
        EntityKind::Metabolite => metabolites_table(store),
        EntityKind::Reaction => reactions_table(store),
    }
}

/// Write a table as delimited text, header first.
pub fn write_table(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(table.delimiter)
        .from_path(path)?;

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| CurationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        target: "metacurate::report",
        path = %path.display(),
        rows = table.row_count(),
        "Wrote report"
    );
    Ok(())
}

/// Write every collection's report into a directory as `<collection>.tsv`.
pub fn write_reports(store: &EntityStore, directory: impl AsRef<Path>) -> Result<()> {
    let directory = directory.as_ref();
    std::fs::create_dir_all(directory).map_err(|e| CurationError::Io {
        path: directory.to_path_buf(),
        source: e,
    })?;

    for kind in EntityKind::ALL {
        let path = directory.join(format!("{}.tsv", kind.plural()));
        write_table(&table(store, kind), path)?;
    }
    Ok(())
}

fn databases<'a>(references: impl Iterator<Item = &'a References>) -> IndexSet<String> {
    references.flat_map(|r| r.keys().cloned()).collect()
}

fn headers(fixed: &[&str], databases: &IndexSet<String>) -> Vec<String> {
    fixed
        .iter()
        .map(|h| h.to_string())
        .chain(databases.iter().map(|db| format!("reference_{}", db)))
        .collect()
}

fn reference_cells(references: &References, databases: &IndexSet<String>) -> Vec<String> {
    databases
        .iter()
        .map(|db| references.get(db).map(|values| join(values.iter())).unwrap_or_default())
        .collect()
}

fn join<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> String {
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TableReader;
    use crate::model::{Compartment, Metabolite, Participant, Reaction};
    use tempfile::TempDir;

    fn store() -> EntityStore {
        EntityStore::new()
            .with_compartment(Compartment::new("c", "cytosol"))
            .with_metabolite(
                Metabolite::new("M1", "glucose")
                    .with_reference("hmdb", "HMDB0000122")
                    .with_reference("hmdb", "HMDB0304632"),
            )
            .with_metabolite(Metabolite::new("M2", "pyruvate").with_reference("pubchem", "1060"))
            .with_reaction(
                Reaction::new("R1", "transport")
                    .with_participant(Participant::reactant("M1", "e"))
                    .with_participant(Participant::product("M1", "c"))
                    .with_process("P1")
                    .with_replicate("R2")
                    .with_replicate("R3"),
            )
    }

    fn cell<'a>(table: &'a DataTable, row: usize, column: &str) -> &'a str {
        let index = table.column_index(column).unwrap();
        &table.rows[row][index]
    }

    #[test]
    fn test_metabolites_table_reference_columns() {
        let table = metabolites_table(&store());

        assert_eq!(
            table.headers,
            vec![
                "identifier",
                "name",
                "formula",
                "mass",
                "charge",
                "reference_hmdb",
                "reference_pubchem"
            ]
        );
        assert_eq!(cell(&table, 0, "reference_hmdb"), "HMDB0000122;HMDB0304632");
        assert_eq!(cell(&table, 0, "reference_pubchem"), "");
        assert_eq!(cell(&table, 1, "reference_pubchem"), "1060");
    }

    #[test]
    fn test_reactions_table_joins_unique_participants() {
        let table = reactions_table(&store());

        assert_eq!(table.row_count(), 1);
        assert_eq!(cell(&table, 0, "metabolites"), "M1");
        assert_eq!(cell(&table, 0, "compartments"), "e;c");
        assert_eq!(cell(&table, 0, "processes"), "P1");
        assert_eq!(cell(&table, 0, "replicates"), "R2;R3");
        assert_eq!(cell(&table, 0, "reversibility"), "false");
    }

    #[test]
    fn test_write_reports() {
        let dir = TempDir::new().unwrap();
        write_reports(&store(), dir.path()).unwrap();

        let (table, _) = TableReader::new()
            .read_file(dir.path().join("metabolites.tsv"))
            .unwrap();
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.row_count(), 2);
        assert_eq!(cell(&table, 1, "name"), "pyruvate");

        assert!(dir.path().join("compartments.tsv").exists());
        assert!(dir.path().join("processes.tsv").exists());
        assert!(dir.path().join("reactions.tsv").exists());
    }
}
