use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Identifies a course offering: a course id together with its offer number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseKey {
    pub course_id: i32,
    pub offer_nbr: i32,
}

impl CourseKey {
    pub fn new(course_id: i32, offer_nbr: i32) -> Self {
        Self {
            course_id,
            offer_nbr,
        }
    }
}

impl Display for CourseKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:06}-{}", self.course_id, self.offer_nbr)
    }
}

/// The full key catalog rows are reconciled against.
///
/// A course record is first sighted under this tuple; later rows with the same
/// tuple only contribute components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogKey {
    pub course: CourseKey,
    pub discipline: String,
    pub catalog_number: String,
}

impl Display for CatalogKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {} {}",
            self.course, self.discipline, self.catalog_number
        )
    }
}

/// A delivery format of a course (lecture, lab, ...) with its own contact hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct Component {
    pub code: String,
    pub contact_hours: f64,
}

impl Component {
    pub fn new(code: impl Into<String>, contact_hours: f64) -> Self {
        Self {
            code: code.into(),
            contact_hours,
        }
    }
}

impl From<(String, f64)> for Component {
    fn from((code, contact_hours): (String, f64)) -> Self {
        Self {
            code,
            contact_hours,
        }
    }
}

impl From<Component> for (String, f64) {
    fn from(component: Component) -> Self {
        (component.code, component.contact_hours)
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {:.1}", self.code, self.contact_hours)
    }
}

/// Order-preserving list of components attached to a course.
///
/// A component appears at most once; [`ComponentList::push`] checks membership
/// before appending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentList(Vec<Component>);

impl ComponentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, component: &Component) -> bool {
        self.0.contains(component)
    }

    /// Appends the component unless it is already present.
    ///
    /// # Returns
    /// `true` if the list grew
    pub fn push(&mut self, component: Component) -> bool {
        if self.contains(&component) {
            return false;
        }
        self.0.push(component);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the contact hours of every component
    pub fn total_hours(&self) -> f64 {
        self.0.iter().map(|c| c.contact_hours).sum()
    }
}

impl From<Component> for ComponentList {
    fn from(component: Component) -> Self {
        Self(vec![component])
    }
}

impl Display for ComponentList {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        for component in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for ComponentList {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => {
                serde_json::from_str(&s).map_err(|_| sea_orm::sea_query::ValueTypeErr)
            }
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "ComponentList".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<ComponentList> for Value {
    fn from(components: ComponentList) -> Self {
        // Stored as a JSON array of [code, hours] pairs
        Value::String(Some(Box::new(
            serde_json::to_string(&components).unwrap_or_else(|_| "[]".to_string()),
        )))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for ComponentList {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        serde_json::from_str(&val).map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to deserialize ComponentList: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for ComponentList {
    fn null() -> Value {
        Value::String(None)
    }
}
