use crate::error::ImportError;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::{fs::File, io::Read, path::Path};

/// First header cell of the catalog, requisite and attribute extracts
pub const INSTITUTION_HEADER: &str = "Institution";

/// First header cell of the attribute-value reference extract
pub const ATTRIBUTE_VALUE_HEADER: &str = "Crse Attr";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Normalizes a header cell into a lookup key.
///
/// # Examples
/// `"Course Offering Nbr"` becomes `"course_offering_nbr"` and `"Acad Org/Dept"`
/// becomes `"acad_org_dept"`.
pub fn normalize_column(cell: &str) -> String {
    cell.replace(BYTE_ORDER_MARK, "")
        .trim()
        .to_lowercase()
        .replace([' ', '/'], "_")
}

/// A CSV extract positioned just past its header row.
///
/// The header row may be preceded by report banners, which are skipped.
pub struct Extract<R> {
    reader: Reader<R>,
    headers: StringRecord,
}

impl Extract<File> {
    /// Opens an extract file and scans for its header row
    ///
    /// # Arguments
    /// * `path` - The CSV file
    /// * `sentinel` - First cell of the header row; `None` when the first row is the header
    pub fn open(path: &Path, sentinel: Option<&str>) -> Result<Self, ImportError> {
        Self::from_reader(File::open(path)?, sentinel)
    }
}

impl<R: Read> Extract<R> {
    pub fn from_reader(source: R, sentinel: Option<&str>) -> Result<Self, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let mut headers = StringRecord::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let first = record
                .get(0)
                .map(|cell| cell.replace(BYTE_ORDER_MARK, ""))
                .unwrap_or_default();

            if sentinel.is_none_or(|sentinel| first == sentinel) {
                headers = record.iter().map(normalize_column).collect();
                break;
            }
        }

        Ok(Self { reader, headers })
    }

    /// Normalized column names; empty if the header was never found
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Deserializes each remaining row into `T` by normalized column name
    ///
    /// A row whose length differs from the header, or that fails to deserialize, yields
    /// [`ImportError::Parse`] carrying its line number; iteration can continue past it.
    pub fn rows<T: DeserializeOwned>(&mut self) -> impl Iterator<Item = Result<T, ImportError>> {
        let headers = &self.headers;

        self.reader.records().map(move |record| {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() != headers.len() {
                return Err(ImportError::Parse {
                    line,
                    message: format!(
                        "len(cols) = {} but len(row) = {}",
                        headers.len(),
                        record.len()
                    ),
                });
            }

            record
                .deserialize(Some(headers))
                .map_err(|e| ImportError::Parse {
                    line,
                    message: e.to_string(),
                })
        })
    }
}

/// Counts the records in a CSV file, header and banners included
pub fn count_records(path: &Path) -> Result<usize, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut count = 0;
    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        institution: String,
        course_id: i32,
        course_offering_nbr: i32,
    }

    #[test]
    fn test_normalize_column() {
        assert_eq!(normalize_column("Institution"), "institution");
        assert_eq!(normalize_column("Course Offering Nbr"), "course_offering_nbr");
        assert_eq!(normalize_column("Acad Org/Dept"), "acad_org_dept");
        assert_eq!(normalize_column("\u{feff}Institution"), "institution");
        assert_eq!(
            normalize_column("Descr of Pre/Co-requisites"),
            "descr_of_pre_co-requisites"
        );
    }

    #[test]
    fn test_skips_banner_rows() {
        let data = "\
Report QNS_QCCV_COURSE_ATTRIBUTES_NP
Run on 2025-08-01
Institution,Course ID,Course Offering Nbr
QNS01,000123,1
QNS01,4567,2
";
        let mut extract = Extract::from_reader(data.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();
        assert_eq!(
            extract.headers().iter().collect::<Vec<_>>(),
            vec!["institution", "course_id", "course_offering_nbr"]
        );

        let rows: Vec<Row> = extract.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            rows,
            vec![
                Row {
                    institution: "QNS01".to_string(),
                    course_id: 123,
                    course_offering_nbr: 1,
                },
                Row {
                    institution: "QNS01".to_string(),
                    course_id: 4567,
                    course_offering_nbr: 2,
                },
            ]
        );
    }

    #[test]
    fn test_byte_order_mark_on_header() {
        let data = "\u{feff}Institution,Course ID,Course Offering Nbr\nBKL01,42,1\n";
        let mut extract = Extract::from_reader(data.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();

        let rows: Vec<Row> = extract.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].institution, "BKL01");
    }

    #[test]
    fn test_first_row_is_header_without_sentinel() {
        let data = "Institution,Course ID,Course Offering Nbr\nBKL01,42,1\n";
        let mut extract = Extract::from_reader(data.as_bytes(), None).unwrap();

        assert_eq!(extract.headers().len(), 3);
        assert_eq!(extract.rows::<Row>().count(), 1);
    }

    #[test]
    fn test_missing_header_yields_no_rows() {
        let data = "a,b,c\n1,2,3\n";
        let mut extract = Extract::from_reader(data.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();

        assert!(extract.headers().is_empty());
        assert_eq!(extract.rows::<Row>().count(), 0);
    }

    #[test]
    fn test_bad_row_reports_line_and_continues() {
        let data = "Institution,Course ID,Course Offering Nbr\nBKL01,abc,1\nBKL01,42,1\n";
        let mut extract = Extract::from_reader(data.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();

        let rows: Vec<Result<Row, ImportError>> = extract.rows().collect();
        assert!(matches!(rows[0], Err(ImportError::Parse { line: 2, .. })));
        assert!(rows[1].is_ok());
    }

    #[test]
    fn test_row_length_must_match_header() {
        let data = "Institution,Course ID,Course Offering Nbr\nBKL01,42,1,EXTRA\nBKL01,43\nBKL01,44,1\n";
        let mut extract = Extract::from_reader(data.as_bytes(), Some(INSTITUTION_HEADER)).unwrap();

        let rows: Vec<Result<Row, ImportError>> = extract.rows().collect();
        match &rows[0] {
            Err(ImportError::Parse { line, message }) => {
                assert_eq!(*line, 2);
                assert_eq!(message, "len(cols) = 3 but len(row) = 4");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
        assert!(matches!(rows[1], Err(ImportError::Parse { line: 3, .. })));
        assert_eq!(rows[2].as_ref().unwrap().course_id, 44);
    }
}
