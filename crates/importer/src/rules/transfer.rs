use super::{KnownInstitutions, admit, exclusions::ExclusionList, parsed, rows::TransferRuleRow};
use crate::{
    anomaly::{Anomaly, RunLog},
    error::ImportError,
    extract::Extract,
    progress::Progress,
    store::RuleStore,
};
use models::rule::Side;
use std::{
    collections::HashMap,
    io::{Read, Write},
};

/// Outcome of repopulating `transfer_rules`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleCounts {
    /// Rules that reached an insert
    pub given: u64,
    /// Rows in the table afterwards
    pub kept: u64,
    pub conflicts: u64,
}

impl RuleCounts {
    pub fn report(&self) -> String {
        format!(
            "Given {} transfer rules: kept {}; rejected {} ({} conflicts).",
            self.given,
            self.kept,
            self.given.saturating_sub(self.kept),
            self.conflicts
        )
    }
}

/// Clears and repopulates `transfer_rules`.
///
/// A rule whose key is already taken is not inserted; it is logged together with the
/// stored rule(s) holding the key.
pub async fn populate_transfer_rules<S, R, W>(
    store: &S,
    extract: &mut Extract<R>,
    known: &KnownInstitutions,
    exclusions: &ExclusionList,
    progress: &mut Progress,
    log: &mut RunLog<W>,
) -> Result<RuleCounts, ImportError>
where
    S: RuleStore + ?Sized,
    R: Read,
    W: Write,
{
    store.clear_transfer_rules().await?;
    let mut counts = RuleCounts::default();
    let mut in_catalog: HashMap<i32, bool> = HashMap::new();

    'rows: for (index, row) in extract.rows::<TransferRuleRow>().enumerate() {
        progress.tick(index + 1, "");
        let Some(row) = parsed(row, log)? else {
            continue;
        };
        if !admit(&row, known, exclusions, log)? {
            continue;
        }

        for (course_id, side) in [
            (row.source_course_id, Side::Source),
            (row.destination_course_id, Side::Destination),
        ] {
            let exists = match in_catalog.get(&course_id) {
                Some(exists) => *exists,
                None => {
                    let exists = store.course_exists(course_id).await?;
                    in_catalog.insert(course_id, exists);
                    exists
                }
            };
            if !exists {
                log.anomaly(&Anomaly::MissingCourse { course_id, side })?;
                continue 'rows;
            }
        }

        let rule = row.to_rule();
        counts.given += 1;
        if !store.insert_transfer_rule(&rule).await? {
            counts.conflicts += 1;
            let stored = store.conflicting_rules(&rule).await?;
            log.anomaly(&Anomaly::RuleConflict {
                rejected: rule,
                stored,
            })?;
        }
    }
    progress.finish();

    counts.kept = store.count_transfer_rules().await?;
    Ok(counts)
}
