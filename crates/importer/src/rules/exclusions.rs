use super::{KnownInstitutions, parsed, rows::TransferRuleRow};
use crate::{
    anomaly::RunLog,
    error::ImportError,
    extract::Extract,
    progress::Progress,
    store::RuleStore,
};
use log::debug;
use models::rule::Side;
use std::{
    collections::{HashMap, HashSet},
    fs,
    io::{self, Read, Write},
    path::Path,
    str::FromStr,
};

/// Course ids the rules reference but the catalog lacks.
///
/// Stored one per line as `<id> src` or `<id> dst`, naming the side of the rule the id
/// was first seen on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionList {
    entries: Vec<(i32, Side)>,
    ids: HashSet<i32>,
}

impl ExclusionList {
    /// Adds `course_id` unless it is already listed
    ///
    /// # Returns
    /// `true` if the list grew
    pub fn add(&mut self, course_id: i32, side: Side) -> bool {
        if !self.ids.insert(course_id) {
            return false;
        }
        self.entries.push((course_id, side));
        true
    }

    pub fn contains(&self, course_id: i32) -> bool {
        self.ids.contains(&course_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let mut list = Self::default();
        for (number, line) in text.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let Some(id) = fields.next() else {
                continue;
            };

            let bad_line = || ImportError::ExclusionList(format!("line {}: {line:?}", number + 1));
            let course_id = id.parse().map_err(|_| bad_line())?;
            let side = fields
                .next()
                .and_then(|side| Side::from_str(side).ok())
                .ok_or_else(bad_line)?;

            list.add(course_id, side);
        }

        Ok(list)
    }

    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ImportError::ExclusionList(format!(
                "{} not found; run with --generate first",
                path.display()
            )),
            _ => ImportError::Io(e),
        })?;

        Self::parse(&text)
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(course_id, side)| format!("{course_id} {side}\n"))
            .collect()
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }
}

/// Builds the exclusion list from the rules extract.
///
/// Rows naming an institution outside `known` are passed over, as are rows that fail to
/// parse (logged). Each course id is looked up in the store at most once.
pub async fn generate_exclusions<S, R, W>(
    store: &S,
    extract: &mut Extract<R>,
    known: &KnownInstitutions,
    progress: &mut Progress,
    log: &mut RunLog<W>,
) -> Result<ExclusionList, ImportError>
where
    S: RuleStore + ?Sized,
    R: Read,
    W: Write,
{
    let mut list = ExclusionList::default();
    let mut checked: HashMap<i32, bool> = HashMap::new();

    for (index, row) in extract.rows::<TransferRuleRow>().enumerate() {
        progress.tick(index + 1, "");
        let Some(row) = parsed(row, log)? else {
            continue;
        };

        if !known.contains(&row.source_institution) || !known.contains(&row.destination_institution)
        {
            continue;
        }

        for (course_id, side) in [
            (row.source_course_id, Side::Source),
            (row.destination_course_id, Side::Destination),
        ] {
            if list.contains(course_id) {
                continue;
            }
            let exists = match checked.get(&course_id) {
                Some(exists) => *exists,
                None => {
                    let exists = store.course_exists(course_id).await?;
                    checked.insert(course_id, exists);
                    exists
                }
            };
            if !exists && list.add(course_id, side) {
                debug!("{course_id:06} ({side}) is not in the catalog");
            }
        }
    }
    progress.finish();

    Ok(list)
}
