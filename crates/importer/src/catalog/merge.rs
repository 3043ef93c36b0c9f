use super::{
    attributes::AttributeIndex,
    requisites::{RequisiteIndex, RequisiteKey},
    rows::CatalogRow,
};
use crate::{anomaly::Anomaly, error::ImportError, store::CourseStore};
use database::entities::courses;
use models::{
    attribute::{AttributeDescriptions, AttributeSummary},
    course::{CatalogKey, ComponentList},
    text::{clean_title, typographic},
};
use std::collections::{HashMap, HashSet};

/// What to do with catalog rows that are not active and schedulable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InactivePolicy {
    #[default]
    Retain,
    Skip,
}

/// Which catalog rows are imported
#[derive(Debug, Clone, PartialEq)]
pub struct MergePolicy {
    pub skip_departments: HashSet<String>,
    pub skip_disciplines: HashSet<String>,
    pub inactive: InactivePolicy,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            skip_departments: ["PEES-BKL", "SOC-YRK", "JOUR-GRD"]
                .into_iter()
                .map(String::from)
                .collect(),
            skip_disciplines: HashSet::from(["JOUR".to_string()]),
            inactive: InactivePolicy::Retain,
        }
    }
}

impl MergePolicy {
    pub fn skips(&self, row: &CatalogRow) -> bool {
        self.skip_departments.contains(&row.acad_org)
            || self.skip_disciplines.contains(&row.subject)
            || (self.inactive == InactivePolicy::Skip && !row.is_active())
    }
}

/// Lookup tables built before the catalog is read
pub struct MergeContext<'a> {
    pub requisites: &'a RequisiteIndex,
    pub attributes: &'a AttributeIndex,
    pub descriptions: &'a AttributeDescriptions,
}

/// What merging one catalog row did
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// Excluded by the merge policy
    Skipped,
    /// First sighting; a new course was stored
    Inserted,
    /// The row's component was appended to the stored course
    ComponentAdded,
    /// A previous run already stored the component
    AlreadyStored,
    /// An earlier row of this run carried the same component
    Repeated(Anomaly),
}

/// Reconciles catalog rows against the store, one row at a time
pub struct CourseMerger<'a> {
    policy: MergePolicy,
    context: MergeContext<'a>,
    /// Components this run has stored, per course
    stored_this_run: HashMap<CatalogKey, ComponentList>,
}

impl<'a> CourseMerger<'a> {
    pub fn new(policy: MergePolicy, context: MergeContext<'a>) -> Self {
        Self {
            policy,
            context,
            stored_this_run: HashMap::new(),
        }
    }

    /// Merges one catalog row into the store
    ///
    /// # Returns
    /// The outcome, or a fatal error when the lookup is ambiguous or the stored scalar
    /// fields disagree with the row. Nothing is written for a row that fails.
    pub async fn merge<S: CourseStore + ?Sized>(
        &mut self,
        store: &S,
        row: &CatalogRow,
    ) -> Result<MergeOutcome, ImportError> {
        if self.policy.skips(row) {
            return Ok(MergeOutcome::Skipped);
        }

        let key = row.key();
        let component = row.component();
        let mut found = store.find_courses(&key).await?;

        let stored = match found.len() {
            0 => {
                store.insert_course(self.new_course(row, &key)).await?;
                self.stored_this_run
                    .insert(key, ComponentList::from(component));
                return Ok(MergeOutcome::Inserted);
            }
            1 => found.remove(0),
            count => return Err(ImportError::AmbiguousLookup { key, count }),
        };

        if stored.contact_hours != row.course_contact_hours
            || stored.primary_component != row.primary_component
            || stored.min_credits != row.min_units
            || stored.max_credits != row.max_units
        {
            return Err(ImportError::Inconsistent { key });
        }

        let this_run = self.stored_this_run.entry(key.clone()).or_default();
        if this_run.contains(&component) {
            return Ok(MergeOutcome::Repeated(Anomaly::RepeatedComponent {
                key,
                institution: row.institution.clone(),
                component,
            }));
        }
        this_run.push(component.clone());

        let mut components = stored.components;
        if !components.push(component) {
            return Ok(MergeOutcome::AlreadyStored);
        }
        store.update_components(&key, components).await?;

        Ok(MergeOutcome::ComponentAdded)
    }

    fn new_course(&self, row: &CatalogRow, key: &CatalogKey) -> courses::Model {
        let requisites = self
            .context
            .requisites
            .get(&RequisiteKey::new(
                &row.institution,
                &key.discipline,
                &key.catalog_number,
            ))
            .unwrap_or("None")
            .to_string();
        let summary = AttributeSummary::summarize(
            self.context.attributes.get(&key.course),
            self.context.descriptions,
        );
        let cuny_subject = match row.subject_external_area.trim() {
            "" => "missing".to_string(),
            subject => subject.to_string(),
        };

        courses::Model {
            course_id: key.course.course_id,
            offer_nbr: key.course.offer_nbr,
            equivalence_group: row.equivalence_group(),
            institution: row.institution.clone(),
            cuny_subject,
            department: row.acad_org.clone(),
            discipline: key.discipline.clone(),
            catalog_number: key.catalog_number.clone(),
            title: clean_title(&row.long_course_title),
            components: ComponentList::from(row.component()),
            contact_hours: row.course_contact_hours,
            min_credits: row.min_units,
            max_credits: row.max_units,
            primary_component: row.primary_component.clone(),
            requisites,
            designation: row.designation.clone(),
            description: typographic(&row.descr),
            career: row.career.clone(),
            course_status: row.crse_catalog_status.clone(),
            discipline_status: row.subject_eff_status.clone(),
            can_schedule: row.schedule_course.clone(),
            attributes: summary.attributes,
            attribute_descriptions: summary.descriptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::rows::fixtures::catalog_row, store::memory::MemoryStore};
    use models::{
        attribute::AttributePair,
        course::{Component, CourseKey},
    };

    struct Tables {
        requisites: RequisiteIndex,
        attributes: AttributeIndex,
        descriptions: AttributeDescriptions,
    }

    impl Tables {
        fn new() -> Self {
            Self {
                requisites: RequisiteIndex::default(),
                attributes: AttributeIndex::default(),
                descriptions: AttributeDescriptions::new(),
            }
        }

        fn merger(&self, policy: MergePolicy) -> CourseMerger<'_> {
            CourseMerger::new(
                policy,
                MergeContext {
                    requisites: &self.requisites,
                    attributes: &self.attributes,
                    descriptions: &self.descriptions,
                },
            )
        }
    }

    fn lab_row() -> CatalogRow {
        let mut row = catalog_row();
        row.component_course_component = "LAB".to_string();
        row.instructor_contact_hours = 2.0;
        row.course_contact_hours = 5.0;
        row
    }

    #[tokio::test]
    async fn test_new_course_record() {
        let mut tables = Tables::new();
        let pair = AttributePair::new("QNS", "FYS");
        tables
            .descriptions
            .insert(pair.clone(), "First Year Seminar".to_string());
        tables
            .attributes
            .add(CourseKey::new(123456, 1), "QNS01", pair, &tables.descriptions)
            .unwrap();

        let store = MemoryStore::default();
        let mut merger = tables.merger(MergePolicy::default());

        let mut row = catalog_row();
        row.long_course_title = "Programmer's\r\nWorkshop ( Honors)".to_string();
        row.subject_external_area = String::new();
        row.equiv_course_group = "0042".to_string();

        let outcome = merger.merge(&store, &row).await.unwrap();
        assert_eq!(outcome, MergeOutcome::Inserted);

        let course = store.course(&row.key()).unwrap();
        assert_eq!(course.title, "Programmer’s Workshop (Honors)");
        assert_eq!(course.cuny_subject, "missing");
        assert_eq!(course.equivalence_group, Some(42));
        assert_eq!(course.requisites, "None");
        assert_eq!(course.attributes, "QNS:FYS");
        assert_eq!(course.attribute_descriptions, "First Year Seminar");
        assert_eq!(
            course.components,
            ComponentList::from(Component::new("LEC", 3.0))
        );
    }

    #[tokio::test]
    async fn test_identical_component_appended_once() {
        let tables = Tables::new();
        let store = MemoryStore::default();
        let mut merger = tables.merger(MergePolicy::default());

        let mut lecture = catalog_row();
        lecture.course_contact_hours = 5.0;
        merger.merge(&store, &lecture).await.unwrap();

        let outcome = merger.merge(&store, &lab_row()).await.unwrap();
        assert_eq!(outcome, MergeOutcome::ComponentAdded);

        let outcome = merger.merge(&store, &lab_row()).await.unwrap();
        assert!(matches!(
            outcome,
            MergeOutcome::Repeated(Anomaly::RepeatedComponent { .. })
        ));

        let course = store.course(&lecture.key()).unwrap();
        assert_eq!(course.components.len(), 2);
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn test_changed_contact_hours_abort_without_write() {
        let tables = Tables::new();
        let store = MemoryStore::default();
        let mut merger = tables.merger(MergePolicy::default());

        merger.merge(&store, &catalog_row()).await.unwrap();
        let writes = store.writes();

        let mut changed = catalog_row();
        changed.course_contact_hours = 4.0;
        changed.component_course_component = "REC".to_string();

        let err = merger.merge(&store, &changed).await.unwrap_err();
        assert!(matches!(err, ImportError::Inconsistent { .. }));
        assert_eq!(store.writes(), writes);
        assert_eq!(store.course(&changed.key()).unwrap().components.len(), 1);
    }

    #[tokio::test]
    async fn test_component_from_previous_run_is_silent() {
        let tables = Tables::new();
        let store = MemoryStore::default();

        let mut first_run = tables.merger(MergePolicy::default());
        first_run.merge(&store, &catalog_row()).await.unwrap();
        let writes = store.writes();

        let mut second_run = tables.merger(MergePolicy::default());
        let outcome = second_run.merge(&store, &catalog_row()).await.unwrap();

        assert_eq!(outcome, MergeOutcome::AlreadyStored);
        assert_eq!(store.writes(), writes);
    }

    #[tokio::test]
    async fn test_ambiguous_lookup_is_fatal() {
        let tables = Tables::new();
        let row = catalog_row();

        let mut first = tables.merger(MergePolicy::default());
        let seed = MemoryStore::default();
        first.merge(&seed, &row).await.unwrap();

        let course = seed.course(&row.key()).unwrap();
        let store = MemoryStore::with_courses(vec![course.clone(), course]);

        let mut merger = tables.merger(MergePolicy::default());
        let err = merger.merge(&store, &row).await.unwrap_err();
        assert!(matches!(err, ImportError::AmbiguousLookup { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_denylist_and_inactive_policy() {
        let tables = Tables::new();
        let store = MemoryStore::default();

        let mut journalism = catalog_row();
        journalism.subject = "JOUR".to_string();
        let mut merger = tables.merger(MergePolicy::default());
        assert_eq!(
            merger.merge(&store, &journalism).await.unwrap(),
            MergeOutcome::Skipped
        );

        let mut inactive = catalog_row();
        inactive.crse_catalog_status = "I".to_string();

        let skip = MergePolicy {
            inactive: InactivePolicy::Skip,
            ..MergePolicy::default()
        };
        let mut merger = tables.merger(skip);
        assert_eq!(
            merger.merge(&store, &inactive).await.unwrap(),
            MergeOutcome::Skipped
        );
        assert!(store.courses().is_empty());

        let mut merger = tables.merger(MergePolicy::default());
        assert_eq!(
            merger.merge(&store, &inactive).await.unwrap(),
            MergeOutcome::Inserted
        );
        assert_eq!(store.courses().len(), 1);
    }
}
