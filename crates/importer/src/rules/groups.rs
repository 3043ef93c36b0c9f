use super::{KnownInstitutions, admit, exclusions::ExclusionList, parsed, rows::TransferRuleRow};
use crate::{
    anomaly::{Anomaly, RunLog},
    error::ImportError,
    extract::Extract,
    progress::{Progress, thousands},
    store::{CourseHome, RuleStore},
};
use models::rule::{RuleGroupKey, Side};
use std::io::{Read, Write};

/// New rows written to each rule group table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCounts {
    pub groups: u64,
    pub source_courses: u64,
    pub destination_courses: u64,
}

impl GroupCounts {
    pub fn report(&self) -> String {
        format!(
            "{} Groups\n{} Source courses\n{} Destination courses",
            thousands(self.groups as usize),
            thousands(self.source_courses as usize),
            thousands(self.destination_courses as usize)
        )
    }
}

/// Looks up the catalog home of one side of a rule, logging when it is missing or
/// disagrees with the rule
async fn home_of<S, W>(
    store: &S,
    row: &TransferRuleRow,
    side: Side,
    log: &mut RunLog<W>,
) -> Result<Option<CourseHome>, ImportError>
where
    S: RuleStore + ?Sized,
    W: Write,
{
    let (course_id, rule_institution) = match side {
        Side::Source => (row.source_course_id, &row.source_institution),
        Side::Destination => (row.destination_course_id, &row.destination_institution),
    };

    let Some(home) = store.course_home(course_id).await? else {
        log.anomaly(&Anomaly::MissingCourse { course_id, side })?;
        return Ok(None);
    };

    if &home.institution != rule_institution {
        log.anomaly(&Anomaly::InstitutionMismatch {
            side,
            rule_institution: rule_institution.clone(),
            course_institution: home.institution.clone(),
            rule: row.to_rule().to_string(),
        })?;
    }

    Ok(Some(home))
}

/// Clears and repopulates `rule_groups`, `source_courses` and `destination_courses`.
///
/// Groups are keyed by the catalog's institution and discipline for the source course
/// and the catalog's institution for the destination course.
pub async fn populate_rule_groups<S, R, W>(
    store: &S,
    extract: &mut Extract<R>,
    known: &KnownInstitutions,
    exclusions: &ExclusionList,
    progress: &mut Progress,
    log: &mut RunLog<W>,
) -> Result<GroupCounts, ImportError>
where
    S: RuleStore + ?Sized,
    R: Read,
    W: Write,
{
    store.clear_rule_groups().await?;
    let mut counts = GroupCounts::default();

    for (index, row) in extract.rows::<TransferRuleRow>().enumerate() {
        progress.tick(index + 1, "");
        let Some(row) = parsed(row, log)? else {
            continue;
        };
        if !admit(&row, known, exclusions, log)? {
            continue;
        }

        let Some(source) = home_of(store, &row, Side::Source, log).await? else {
            continue;
        };
        let Some(destination) = home_of(store, &row, Side::Destination, log).await? else {
            continue;
        };

        let key = RuleGroupKey {
            source_institution: source.institution,
            discipline: source.discipline,
            group_number: row.src_equivalency_component,
            destination_institution: destination.institution,
        };

        counts.groups += store.insert_rule_group(&key).await?;
        counts.source_courses += store
            .insert_source_course(
                &key,
                row.source_course_id,
                row.min_grade_pts,
                row.max_grade_pts,
            )
            .await?;
        counts.destination_courses += store
            .insert_destination_course(&key, row.destination_course_id, row.units_taken)
            .await?;
    }
    progress.finish();

    Ok(counts)
}
