pub mod exclusions;
pub mod groups;
pub mod rows;
pub mod transfer;

use crate::{
    anomaly::{Anomaly, RunLog},
    config::{CommonArgs, RuleArgs},
    error::ImportError,
    extract::{Extract, count_records},
    files::{DateSource, DatedFile},
    progress::{Progress, thousands},
    store::DbStore,
};
use database::services::institution::InstitutionService;
use exclusions::{ExclusionList, generate_exclusions};
use groups::populate_rule_groups;
use log::info;
use rows::TransferRuleRow;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::{
    collections::HashSet,
    io::{self, Write},
};
use transfer::populate_transfer_rules;

/// Institution codes rules may refer to
pub type KnownInstitutions = HashSet<String>;

/// Rows between progress lines
const PROGRESS_EVERY: usize = 10_000;

/// Which tables a rule program populates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleProgram {
    RuleGroups,
    TransferRules,
}

/// Logs a row that failed to parse and turns it into `None`; other errors pass through
fn parsed<W: Write>(
    row: Result<TransferRuleRow, ImportError>,
    log: &mut RunLog<W>,
) -> Result<Option<TransferRuleRow>, ImportError> {
    match row {
        Ok(row) => Ok(Some(row)),
        Err(ImportError::Parse { line, message }) => {
            log.anomaly(&Anomaly::MalformedRow { line, message })?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Whether a rule names known institutions and no excluded course.
///
/// Unknown institutions are logged; excluded ids are passed over silently since the
/// exclusion list already records them.
fn admit<W: Write>(
    row: &TransferRuleRow,
    known: &KnownInstitutions,
    exclusions: &ExclusionList,
    log: &mut RunLog<W>,
) -> io::Result<bool> {
    for institution in [&row.source_institution, &row.destination_institution] {
        if !known.contains(institution) {
            log.anomaly(&Anomaly::UnknownInstitution(institution.clone()))?;
            return Ok(false);
        }
    }

    Ok(!exclusions.contains(row.source_course_id) && !exclusions.contains(row.destination_course_id))
}

/// Runs a rule program against the database.
///
/// With `--generate` only the exclusion list is written. Otherwise the program's tables
/// are repopulated in one transaction and anomalies go to the conflicts log.
pub async fn run(
    db: &DatabaseConnection,
    program: RuleProgram,
    common: &CommonArgs,
    args: &RuleArgs,
) -> Result<(), ImportError> {
    let rules_file = DatedFile::read(&args.rules_file(common)?, DateSource::Modified)?;
    if args.report {
        println!("Transfer rules query file: {rules_file}");
    }

    let known: KnownInstitutions = InstitutionService::known_codes(db)
        .await?
        .into_iter()
        .collect();
    let mut progress = Progress::new(
        common.progress,
        count_records(&rules_file.path)?,
        PROGRESS_EVERY,
    );
    let mut extract = Extract::open(&rules_file.path, None)?;

    if args.generate {
        let mut log = RunLog::new(io::stderr());
        let list = generate_exclusions(
            &DbStore::new(db),
            &mut extract,
            &known,
            &mut progress,
            &mut log,
        )
        .await?;

        let path = args.known_bad_ids();
        list.save(&path)?;
        info!(
            "{} course ids written to {}",
            thousands(list.len()),
            path.display()
        );
        return Ok(());
    }

    let exclusions = ExclusionList::load(&args.known_bad_ids())?;
    let mut log = RunLog::create(&args.conflicts_log())?;

    let txn = db.begin().await?;
    InstitutionService::record_update(&txn, "rules", rules_file.date, &rules_file.file_name())
        .await?;

    let store = DbStore::new(&txn);
    let report = match program {
        RuleProgram::RuleGroups => {
            populate_rule_groups(
                &store,
                &mut extract,
                &known,
                &exclusions,
                &mut progress,
                &mut log,
            )
            .await?
            .report()
        }
        RuleProgram::TransferRules => {
            populate_transfer_rules(
                &store,
                &mut extract,
                &known,
                &exclusions,
                &mut progress,
                &mut log,
            )
            .await?
            .report()
        }
    };

    log.flush()?;
    txn.commit().await?;

    info!("{} anomalies logged", thousands(log.anomaly_count()));
    if args.report {
        println!("{report}");
    }

    Ok(())
}
