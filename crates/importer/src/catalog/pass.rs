use super::{
    attributes::{AttributeIndex, load_attribute_descriptions},
    merge::{CourseMerger, MergeContext, MergeOutcome, MergePolicy},
    requisites::RequisiteIndex,
    rows::CatalogRow,
};
use crate::{
    anomaly::RunLog,
    error::ImportError,
    extract::{ATTRIBUTE_VALUE_HEADER, Extract, INSTITUTION_HEADER, count_records},
    files::{self, DateSource, DatedFile},
    progress::{Progress, elapsed_phrase, thousands},
    store::{CourseStore, DbStore},
};
use chrono::NaiveDate;
use database::services::{course::CourseService, institution::InstitutionService};
use log::{debug, info};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Rows between progress lines
const PROGRESS_EVERY: usize = 1000;

/// The extracts one course pass reads
#[derive(Debug, Clone)]
pub struct CatalogExtracts {
    pub catalog: DatedFile,
    pub requisites: DatedFile,
    pub attributes: DatedFile,
    pub attribute_values: PathBuf,
}

impl CatalogExtracts {
    /// Finds the latest of each extract in `dir`
    pub fn locate(dir: &Path) -> Result<Self, ImportError> {
        let dated = |prefix: &str| {
            files::latest_extract(dir, prefix)
                .and_then(|path| DatedFile::read(&path, DateSource::Birth))
        };

        Ok(Self {
            catalog: dated(files::CATALOG_PREFIX)?,
            requisites: dated(files::REQUISITES_PREFIX)?,
            attributes: dated(files::ATTRIBUTES_PREFIX)?,
            attribute_values: files::latest_extract(dir, files::ATTRIBUTE_VALUES_PREFIX)?,
        })
    }

    /// The date shared by the catalog, requisites and attributes extracts
    pub fn check_dates(&self) -> Result<NaiveDate, ImportError> {
        files::ensure_same_date(vec![
            self.attributes.clone(),
            self.catalog.clone(),
            self.requisites.clone(),
        ])
    }
}

/// Settings for one course pass
#[derive(Debug, Clone, Default)]
pub struct PassOptions {
    pub progress: bool,
    pub policy: MergePolicy,
}

/// Tallies of one course pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassSummary {
    pub rows: usize,
    pub skipped: usize,
    pub inserted: usize,
    pub components_added: usize,
    pub already_stored: usize,
    pub repeated: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: &MergeOutcome) {
        match outcome {
            MergeOutcome::Skipped => self.skipped += 1,
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::ComponentAdded => self.components_added += 1,
            MergeOutcome::AlreadyStored => self.already_stored += 1,
            MergeOutcome::Repeated(_) => self.repeated += 1,
        }
    }

    /// Number of courses and component updates written
    pub fn writes(&self) -> usize {
        self.inserted + self.components_added
    }

    pub fn summary_line(&self, elapsed: Duration) -> String {
        format!(
            "Inserted {} courses in {}.",
            thousands(self.inserted),
            elapsed_phrase(elapsed)
        )
    }
}

/// Merges every catalog row from `extract` into `store`.
///
/// Repeated components are written to `log`; the first fatal error stops the pass.
pub async fn reconcile<S, R, W>(
    store: &S,
    extract: &mut Extract<R>,
    merger: &mut CourseMerger<'_>,
    progress: &mut Progress,
    log: &mut RunLog<W>,
) -> Result<PassSummary, ImportError>
where
    S: CourseStore + ?Sized,
    R: Read,
    W: Write,
{
    let mut summary = PassSummary::default();

    for row in extract.rows::<CatalogRow>() {
        let row = row?;
        summary.rows += 1;
        progress.tick(
            summary.rows,
            &format!("; {} courses", thousands(summary.inserted)),
        );

        let outcome = merger.merge(store, &row).await?;
        if let MergeOutcome::Repeated(anomaly) = &outcome {
            log.anomaly(anomaly)?;
        }
        summary.record(&outcome);
    }
    progress.finish();

    Ok(summary)
}

/// Runs the course pass against the database in a single transaction.
///
/// A fatal error returns before the commit; dropping the transaction rolls every write
/// of the pass back.
pub async fn populate_courses<W: Write>(
    db: &DatabaseConnection,
    extracts: &CatalogExtracts,
    options: &PassOptions,
    log: &mut RunLog<W>,
) -> Result<PassSummary, ImportError> {
    let started = Instant::now();
    let date = extracts.check_dates()?;
    debug!(
        "Catalog {}; requisites {}; attributes {}",
        extracts.catalog, extracts.requisites, extracts.attributes
    );

    let txn = db.begin().await?;
    InstitutionService::record_update(&txn, "courses", date, &extracts.catalog.file_name())
        .await?;

    let requisites = RequisiteIndex::build(&mut Extract::open(
        &extracts.requisites.path,
        Some(INSTITUTION_HEADER),
    )?)?;
    debug!("{} requisites", thousands(requisites.len()));

    let descriptions = load_attribute_descriptions(&mut Extract::open(
        &extracts.attribute_values,
        Some(ATTRIBUTE_VALUE_HEADER),
    )?)?;
    let attributes = AttributeIndex::build(
        &mut Extract::open(&extracts.attributes.path, Some(INSTITUTION_HEADER))?,
        &descriptions,
        log,
    )?;
    let attribute_rows =
        CourseService::replace_attributes(&txn, attributes.to_active_models()).await?;
    debug!(
        "{} courses with attributes; {} attribute rows",
        thousands(attributes.len()),
        attribute_rows
    );

    let mut merger = CourseMerger::new(
        options.policy.clone(),
        MergeContext {
            requisites: &requisites,
            attributes: &attributes,
            descriptions: &descriptions,
        },
    );
    let mut progress = Progress::new(
        options.progress,
        count_records(&extracts.catalog.path)?,
        PROGRESS_EVERY,
    );
    let mut catalog = Extract::open(&extracts.catalog.path, Some(INSTITUTION_HEADER))?;

    let summary = reconcile(
        &DbStore::new(&txn),
        &mut catalog,
        &mut merger,
        &mut progress,
        log,
    )
    .await?;

    let line = summary.summary_line(started.elapsed());
    info!("{line}");
    log.note(line)?;

    InstitutionService::stamp_date_updated(&txn, date).await?;
    txn.commit().await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::merge::InactivePolicy, store::memory::MemoryStore};
    use models::{attribute::AttributeDescriptions, course::Component};

    const CATALOG: &str = "\
QNS_QCCV_CU_CATALOG_NP
Institution,Acad Org,Subject,Course ID,Offer Nbr,Equiv Course Group,Catalog Number,Component Course Component,Instructor Contact Hours,Primary Component,Course Contact Hours,Min Units,Max Units,Subject External Area,Long Course Title,Designation,Descr,Career,Crse Catalog Status,Subject Eff Status,Schedule Course
QNS01,CMSCI-QNS,CSCI,123456,1,,111,LEC,3,LEC,5,4,4,CMSC,Intro to Programming,RLA,Programming.,UGRD,A,A,Y
QNS01,CMSCI-QNS,CSCI,123456,1,,111,LAB,2,LEC,5,4,4,CMSC,Intro to Programming,RLA,Programming.,UGRD,A,A,Y
QNS01,CMSCI-QNS,CSCI,123456,1,,111,LAB,2,LEC,5,4,4,CMSC,Intro to Programming,RLA,Programming.,UGRD,A,A,Y
QNS01,JOUR-QNS,JOUR,222222,1,,100,LEC,3,LEC,3,3,3,JOUR,Reporting,RLA,News.,UGRD,A,A,Y
BKL01,HIST-BKL,HIST,333333,1,0007,1001,LEC,3,LEC,3,3,3,HIST,World History,RLA,History.,UGRD,I,A,N
";

    async fn run(store: &MemoryStore, csv: &str, policy: MergePolicy) -> (PassSummary, String) {
        let requisites = RequisiteIndex::default();
        let attributes = AttributeIndex::default();
        let descriptions = AttributeDescriptions::new();
        let mut merger = CourseMerger::new(
            policy,
            MergeContext {
                requisites: &requisites,
                attributes: &attributes,
                descriptions: &descriptions,
            },
        );
        let mut extract = Extract::from_reader(csv.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();
        let mut progress = Progress::new(false, 0, PROGRESS_EVERY);
        let mut log = RunLog::new(Vec::new());

        let summary = reconcile(store, &mut extract, &mut merger, &mut progress, &mut log)
            .await
            .unwrap();

        (summary, String::from_utf8(log.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_reconcile_catalog() {
        let store = MemoryStore::default();
        let (summary, log) = run(&store, CATALOG, MergePolicy::default()).await;

        assert_eq!(summary.rows, 5);
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.components_added, 1);
        assert_eq!(summary.repeated, 1);
        assert_eq!(summary.skipped, 1);
        assert!(log.starts_with("Repeated component: 123456 1 QNS01 CSCI 111 :: LAB 2.0"));

        let csci = store
            .courses()
            .into_iter()
            .find(|c| c.course_id == 123456)
            .unwrap();
        let codes: Vec<Component> = csci.components.iter().cloned().collect();
        assert_eq!(
            codes,
            vec![Component::new("LEC", 3.0), Component::new("LAB", 2.0)]
        );
    }

    #[tokio::test]
    async fn test_rerun_adds_nothing_new() {
        let store = MemoryStore::default();
        let (_, first_log) = run(&store, CATALOG, MergePolicy::default()).await;
        let writes = store.writes();

        let (summary, second_log) = run(&store, CATALOG, MergePolicy::default()).await;

        assert_eq!(summary.writes(), 0);
        assert_eq!(store.writes(), writes);
        assert_eq!(second_log, first_log);
    }

    #[tokio::test]
    async fn test_skip_inactive_policy() {
        let store = MemoryStore::default();
        let policy = MergePolicy {
            inactive: InactivePolicy::Skip,
            ..MergePolicy::default()
        };
        let (summary, _) = run(&store, CATALOG, policy).await;

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 2);
        assert!(store.courses().iter().all(|c| c.course_id != 333333));
    }

    #[tokio::test]
    async fn test_inconsistent_row_stops_pass() {
        let csv = format!(
            "{CATALOG}QNS01,CMSCI-QNS,CSCI,123456,1,,111,REC,1,LEC,6,4,4,CMSC,Intro to Programming,RLA,Programming.,UGRD,A,A,Y\n"
        );
        let requisites = RequisiteIndex::default();
        let attributes = AttributeIndex::default();
        let descriptions = AttributeDescriptions::new();
        let mut merger = CourseMerger::new(
            MergePolicy::default(),
            MergeContext {
                requisites: &requisites,
                attributes: &attributes,
                descriptions: &descriptions,
            },
        );
        let store = MemoryStore::default();
        let mut extract = Extract::from_reader(csv.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();
        let mut progress = Progress::new(false, 0, PROGRESS_EVERY);
        let mut log = RunLog::new(Vec::new());

        let err = reconcile(&store, &mut extract, &mut merger, &mut progress, &mut log)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Inconsistent hours/credits/component for 123456-1 CSCI 111"
        );
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn test_summary_line() {
        let summary = PassSummary {
            inserted: 12345,
            ..PassSummary::default()
        };

        assert_eq!(
            summary.summary_line(Duration::from_millis(61_500)),
            "Inserted 12,345 courses in 1 minute and 1.5 seconds."
        );
    }
}
