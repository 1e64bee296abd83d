//! Curation of a metabolite's external database references.

use crate::directive::ReferenceEdit;
use crate::model::Metabolite;

/// Apply reference edits to a metabolite.
///
/// A novel value is appended to its database's list unless already present;
/// an error value is removed wherever it occurs. Both halves of one edit are
/// applied, novel first. Returns how many values were added or removed.
pub fn curate_references(metabolite: &mut Metabolite, edits: &[ReferenceEdit]) -> usize {
    let mut changes = 0;

    for edit in edits {
        if let Some(novel) = &edit.novel {
            let added = metabolite
                .references
                .entry(edit.database.clone())
                .or_default()
                .insert(novel.clone());
            if added {
                changes += 1;
            }
        }

        if let Some(error) = &edit.error {
            let removed = metabolite
                .references
                .get_mut(&edit.database)
                .is_some_and(|values| values.shift_remove(error));
            if removed {
                changes += 1;
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glucose() -> Metabolite {
        Metabolite::new("M1", "glucose")
            .with_reference("hmdb", "HMDB0000122")
            .with_reference("hmdb", "HMDB0304632")
            .with_reference("pubchem", "5793")
    }

    #[test]
    fn test_novel_reference_appends_once() {
        let mut metabolite = glucose();
        let edits = vec![
            ReferenceEdit::new("hmdb").with_novel("HMDB0000001"),
            ReferenceEdit::new("hmdb").with_novel("HMDB0000122"),
        ];

        assert_eq!(curate_references(&mut metabolite, &edits), 1);
        assert_eq!(
            metabolite.references_for("hmdb"),
            vec!["HMDB0000122", "HMDB0304632", "HMDB0000001"]
        );
    }

    #[test]
    fn test_error_reference_is_removed() {
        let mut metabolite = glucose();
        let edits = vec![ReferenceEdit::new("hmdb").with_error("HMDB0000122")];

        assert_eq!(curate_references(&mut metabolite, &edits), 1);
        assert_eq!(metabolite.references_for("hmdb"), vec!["HMDB0304632"]);
    }

    #[test]
    fn test_novel_and_error_are_independent() {
        let mut metabolite = glucose();
        let edits = vec![ReferenceEdit::new("pubchem")
            .with_novel("107526")
            .with_error("5793")];

        assert_eq!(curate_references(&mut metabolite, &edits), 2);
        assert_eq!(metabolite.references_for("pubchem"), vec!["107526"]);
    }

    #[test]
    fn test_unknown_database() {
        let mut metabolite = glucose();

        let removed = curate_references(
            &mut metabolite,
            &[ReferenceEdit::new("chebi").with_error("CHEBI:4167")],
        );
        assert_eq!(removed, 0);
        assert!(!metabolite.references.contains_key("chebi"));

        curate_references(&mut metabolite, &[ReferenceEdit::new("chebi").with_novel("CHEBI:4167")]);
        assert_eq!(metabolite.references_for("chebi"), vec!["CHEBI:4167"]);
    }
}
