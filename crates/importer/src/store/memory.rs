use super::{CourseHome, CourseStore, RuleStore};
use async_trait::async_trait;
use database::entities::courses;
use models::{
    course::{CatalogKey, ComponentList, CourseKey},
    rule::{RuleGroupKey, TransferRule},
};
use sea_orm::DbErr;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Mutex,
};

type RuleKey = (i32, i32, i32, i32);

#[derive(Default)]
struct Tables {
    courses: Vec<courses::Model>,
    rule_groups: BTreeSet<(String, String, i32, String)>,
    source_courses: BTreeMap<(String, String, i32, String, i32), (f64, f64)>,
    destination_courses: BTreeMap<(String, String, i32, String, i32), f64>,
    transfer_rules: BTreeMap<RuleKey, TransferRule>,
    writes: usize,
}

/// In-memory store for exercising the passes without a database
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn group_tuple(key: &RuleGroupKey) -> (String, String, i32, String) {
    (
        key.source_institution.clone(),
        key.discipline.clone(),
        key.group_number,
        key.destination_institution.clone(),
    )
}

fn rule_key(rule: &TransferRule) -> RuleKey {
    (
        rule.source_course_id,
        rule.rule_priority,
        rule.rule_group,
        rule.destination_course_id,
    )
}

fn matches(course: &courses::Model, key: &CatalogKey) -> bool {
    CourseKey::new(course.course_id, course.offer_nbr) == key.course
        && course.discipline == key.discipline
        && course.catalog_number == key.catalog_number
}

/// A stored LEC course with only the fields the rule passes read filled in
pub fn stored_course(course_id: i32, institution: &str, discipline: &str) -> courses::Model {
    courses::Model {
        course_id,
        offer_nbr: 1,
        equivalence_group: None,
        institution: institution.to_string(),
        cuny_subject: discipline.to_string(),
        department: format!("{discipline}-{institution}"),
        discipline: discipline.to_string(),
        catalog_number: "101".to_string(),
        title: "Fixture".to_string(),
        components: ComponentList::new(),
        contact_hours: 3.0,
        min_credits: 3.0,
        max_credits: 3.0,
        primary_component: "LEC".to_string(),
        requisites: "None".to_string(),
        designation: "RLA".to_string(),
        description: String::new(),
        career: "UGRD".to_string(),
        course_status: "A".to_string(),
        discipline_status: "A".to_string(),
        can_schedule: "Y".to_string(),
        attributes: "None".to_string(),
        attribute_descriptions: "No course attributes".to_string(),
    }
}

impl MemoryStore {
    pub fn with_courses(courses: Vec<courses::Model>) -> Self {
        let store = Self::default();
        store.lock().courses = courses;
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Number of insert and update statements that changed something
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    pub fn courses(&self) -> Vec<courses::Model> {
        self.lock().courses.clone()
    }

    pub fn course(&self, key: &CatalogKey) -> Option<courses::Model> {
        self.lock().courses.iter().find(|c| matches(c, key)).cloned()
    }

    pub fn rule_group_count(&self) -> usize {
        self.lock().rule_groups.len()
    }

    pub fn source_course_ids(&self) -> Vec<i32> {
        self.lock().source_courses.keys().map(|k| k.4).collect()
    }

    pub fn destination_course_ids(&self) -> Vec<i32> {
        self.lock().destination_courses.keys().map(|k| k.4).collect()
    }

    pub fn transfer_rules(&self) -> Vec<TransferRule> {
        self.lock().transfer_rules.values().cloned().collect()
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn find_courses(&self, key: &CatalogKey) -> Result<Vec<courses::Model>, DbErr> {
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|c| matches(c, key))
            .cloned()
            .collect())
    }

    async fn insert_course(&self, course: courses::Model) -> Result<(), DbErr> {
        let mut tables = self.lock();
        let key = CourseKey::new(course.course_id, course.offer_nbr);
        if tables
            .courses
            .iter()
            .any(|c| CourseKey::new(c.course_id, c.offer_nbr) == key)
        {
            return Err(DbErr::Custom(format!("duplicate key {key}")));
        }

        tables.courses.push(course);
        tables.writes += 1;
        Ok(())
    }

    async fn update_components(
        &self,
        key: &CatalogKey,
        components: ComponentList,
    ) -> Result<(), DbErr> {
        let mut tables = self.lock();
        let course = tables
            .courses
            .iter_mut()
            .find(|c| matches(c, key))
            .ok_or(DbErr::RecordNotUpdated)?;

        course.components = components;
        tables.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl RuleStore for MemoryStore {
    async fn course_exists(&self, course_id: i32) -> Result<bool, DbErr> {
        Ok(self.lock().courses.iter().any(|c| c.course_id == course_id))
    }

    async fn course_home(&self, course_id: i32) -> Result<Option<CourseHome>, DbErr> {
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|c| c.course_id == course_id)
            .min_by_key(|c| c.offer_nbr)
            .map(|c| CourseHome {
                institution: c.institution.clone(),
                discipline: c.discipline.clone(),
            }))
    }

    async fn clear_rule_groups(&self) -> Result<(), DbErr> {
        let mut tables = self.lock();
        tables.source_courses.clear();
        tables.destination_courses.clear();
        tables.rule_groups.clear();
        Ok(())
    }

    async fn insert_rule_group(&self, key: &RuleGroupKey) -> Result<u64, DbErr> {
        let mut tables = self.lock();
        let inserted = tables.rule_groups.insert(group_tuple(key));
        tables.writes += usize::from(inserted);
        Ok(u64::from(inserted))
    }

    async fn insert_source_course(
        &self,
        key: &RuleGroupKey,
        course_id: i32,
        min_gpa: f64,
        max_gpa: f64,
    ) -> Result<u64, DbErr> {
        let (si, d, g, di) = group_tuple(key);
        let mut tables = self.lock();
        if tables.source_courses.contains_key(&(si.clone(), d.clone(), g, di.clone(), course_id)) {
            return Ok(0);
        }

        tables
            .source_courses
            .insert((si, d, g, di, course_id), (min_gpa, max_gpa));
        tables.writes += 1;
        Ok(1)
    }

    async fn insert_destination_course(
        &self,
        key: &RuleGroupKey,
        course_id: i32,
        transfer_credits: f64,
    ) -> Result<u64, DbErr> {
        let (si, d, g, di) = group_tuple(key);
        let mut tables = self.lock();
        if tables
            .destination_courses
            .contains_key(&(si.clone(), d.clone(), g, di.clone(), course_id))
        {
            return Ok(0);
        }

        tables
            .destination_courses
            .insert((si, d, g, di, course_id), transfer_credits);
        tables.writes += 1;
        Ok(1)
    }

    async fn clear_transfer_rules(&self) -> Result<(), DbErr> {
        self.lock().transfer_rules.clear();
        Ok(())
    }

    async fn insert_transfer_rule(&self, rule: &TransferRule) -> Result<bool, DbErr> {
        let mut tables = self.lock();
        let key = rule_key(rule);
        if tables.transfer_rules.contains_key(&key) {
            return Ok(false);
        }

        tables.transfer_rules.insert(key, rule.clone());
        tables.writes += 1;
        Ok(true)
    }

    async fn conflicting_rules(&self, rule: &TransferRule) -> Result<Vec<TransferRule>, DbErr> {
        Ok(self
            .lock()
            .transfer_rules
            .get(&rule_key(rule))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn count_transfer_rules(&self) -> Result<u64, DbErr> {
        Ok(self.lock().transfer_rules.len() as u64)
    }
}
