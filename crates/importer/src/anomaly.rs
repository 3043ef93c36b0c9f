use log::warn;
use models::{
    attribute::AttributePair,
    course::{CatalogKey, Component, CourseKey},
    rule::{Side, TransferRule},
};
use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Something in the input that was logged and skipped rather than imported
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// An attribute pair missing from the reference vocabulary
    UnknownAttribute { course_id: i32, pair: AttributePair },
    /// An attribute pair already recorded for the course
    DuplicateAttribute { key: CourseKey, pair: AttributePair },
    /// A component seen twice for the same course in one run
    RepeatedComponent {
        key: CatalogKey,
        institution: String,
        component: Component,
    },
    UnknownInstitution(String),
    /// A rule referencing a course id absent from the catalog
    MissingCourse { course_id: i32, side: Side },
    /// A rule whose institution disagrees with the catalog's record of the course
    InstitutionMismatch {
        side: Side,
        rule_institution: String,
        course_institution: String,
        rule: String,
    },
    /// A transfer rule whose key is already taken by the stored rules
    RuleConflict {
        rejected: TransferRule,
        stored: Vec<TransferRule>,
    },
    MalformedRow { line: u64, message: String },
}

impl Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAttribute { course_id, pair } => write!(
                f,
                "{course_id:6}: Attempt to add {pair}, which is not in attribute_descriptions, to attribute_pairs."
            ),
            Self::DuplicateAttribute { key, pair } => {
                write!(f, "ERROR: Attempt to re-add {pair} to attribute_pairs[{key}]")
            }
            Self::RepeatedComponent {
                key,
                institution,
                component,
            } => write!(
                f,
                "Repeated component: {} {} {} {} {} :: {}",
                key.course.course_id,
                key.course.offer_nbr,
                institution,
                key.discipline,
                key.catalog_number,
                component
            ),
            Self::UnknownInstitution(code) => write!(f, "Unknown institution: {code}"),
            Self::MissingCourse { course_id, side } => {
                write!(f, "Course {course_id:06} ({side}) is not in the catalog")
            }
            Self::InstitutionMismatch {
                side,
                rule_institution,
                course_institution,
                rule,
            } => {
                let label = match side {
                    Side::Source => "Source",
                    Side::Destination => "Destination",
                };
                write!(
                    f,
                    "{label} institution ({rule_institution}) != course institution ({course_institution})\n{rule}"
                )
            }
            Self::RuleConflict { rejected, stored } => {
                write!(f, "-- {rejected}")?;
                for rule in stored {
                    write!(f, "\n++ {rule}")?;
                }
                Ok(())
            }
            Self::MalformedRow { line, message } => write!(f, "Line {line}: {message}"),
        }
    }
}

/// Free-text log of one program run
pub struct RunLog<W: Write> {
    out: W,
    anomalies: usize,
}

impl RunLog<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RunLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, anomalies: 0 }
    }

    /// Records a non-fatal finding in the log and through `log::warn!`
    pub fn anomaly(&mut self, anomaly: &Anomaly) -> io::Result<()> {
        warn!("{anomaly}");
        self.anomalies += 1;
        writeln!(self.out, "{anomaly}")
    }

    /// Writes an informational line that is not counted as an anomaly
    pub fn note(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
