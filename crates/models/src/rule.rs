use std::fmt::{Display as FmtDisplay, Formatter, Result as FmtResult};
use strum::{AsRefStr, Display, EnumString};

/// Which end of a transfer rule a course id was referenced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
pub enum Side {
    #[strum(serialize = "src")]
    Source,
    #[strum(serialize = "dst")]
    Destination,
}

/// Key of a rule group: an equivalence mapping between two institutions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleGroupKey {
    pub source_institution: String,
    pub discipline: String,
    pub group_number: i32,
    pub destination_institution: String,
}

impl FmtDisplay for RuleGroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}-{}-{}",
            self.source_institution, self.discipline, self.group_number, self.destination_institution
        )
    }
}

/// A single row of the flat `transfer_rules` table
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRule {
    pub source_course_id: i32,
    pub source_institution: String,
    pub source_discipline: String,
    pub source_catalog_number: String,
    pub rule_priority: i32,
    pub rule_group: i32,
    pub rule_group_sequence: i32,
    pub min_source_units: f64,
    pub max_source_units: f64,
    pub min_gpa: f64,
    pub max_gpa: f64,
    pub destination_course_id: i32,
    pub destination_institution: String,
    pub destination_discipline: String,
    pub destination_catalog_number: String,
    pub taken_destination_units: f64,
    pub min_destination_units: f64,
    pub max_destination_units: f64,
}

/// Formats `value` to three significant digits, keeping a fractional digit when the
/// result is written in fixed notation (`3.0`, `2.33`, `12.5`)
fn significant(value: f64) -> String {
    const DIGITS: i32 = 3;

    let scientific = format!("{:.*e}", (DIGITS - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if (-4..DIGITS).contains(&exponent) {
        let decimals = (DIGITS - 1 - exponent).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0')
        } else {
            &fixed
        };
        match trimmed.strip_suffix('.') {
            Some(whole) => format!("{whole}.0"),
            None if !trimmed.contains('.') => format!("{trimmed}.0"),
            None => trimmed.to_string(),
        }
    } else {
        let mantissa = if mantissa.contains('.') {
            mantissa.trim_end_matches('0').trim_end_matches('.')
        } else {
            mantissa
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

// Fixed-width layout used in the conflicts log
impl FmtDisplay for TransferRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:06} {:5} {:7} {:8} {:2} {:3} {:2} {:>6} {:>6} {:>6} {:>6} {:06} {:5} {:5} {:8}",
            self.source_course_id,
            self.source_institution,
            self.source_discipline,
            self.source_catalog_number,
            self.rule_priority,
            self.rule_group,
            self.rule_group_sequence,
            significant(self.min_source_units),
            significant(self.max_source_units),
            significant(self.min_gpa),
            significant(self.max_gpa),
            self.destination_course_id,
            self.destination_institution,
            self.destination_discipline,
            self.destination_catalog_number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_side_round_trip() {
        assert_eq!(Side::Source.to_string(), "src");
        assert_eq!(Side::Destination.as_ref(), "dst");
        assert_eq!(Side::from_str("dst").unwrap(), Side::Destination);
        assert!(Side::from_str("both").is_err());
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant(3.0), "3.0");
        assert_eq!(significant(0.0), "0.0");
        assert_eq!(significant(2.5), "2.5");
        assert_eq!(significant(3.75), "3.75");
        assert_eq!(significant(12.5), "12.5");
        assert_eq!(significant(100.0), "100.0");
        assert_eq!(significant(0.05), "0.05");
        assert_eq!(significant(1234.0), "1.23e+03");
    }

    #[test]
    fn test_conflict_line_layout() {
        let rule = TransferRule {
            source_course_id: 1001,
            source_institution: "QCC01".to_string(),
            source_discipline: "CSCI".to_string(),
            source_catalog_number: "101".to_string(),
            rule_priority: 1,
            rule_group: 7,
            rule_group_sequence: 1,
            min_source_units: 3.0,
            max_source_units: 3.0,
            min_gpa: 0.0,
            max_gpa: 4.0,
            destination_course_id: 2001,
            destination_institution: "QNS01".to_string(),
            destination_discipline: "CSCI".to_string(),
            destination_catalog_number: "111".to_string(),
            taken_destination_units: 3.0,
            min_destination_units: 3.0,
            max_destination_units: 3.0,
        };

        assert_eq!(
            rule.to_string(),
            "001001 QCC01 CSCI    101       1   7  1    3.0    3.0    0.0    4.0 002001 QNS01 CSCI  111     "
        );
    }
}
