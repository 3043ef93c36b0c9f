use database::entities::courses;

const ATTRIBUTE_WIDTH: usize = 20;

/// Sum of component hours when an active course's components disagree with its contact hours
pub fn hours_mismatch(course: &courses::Model) -> Option<f64> {
    if course.course_status != "A" {
        return None;
    }

    let hours = course.components.total_hours();
    (hours != course.contact_hours).then_some(hours)
}

/// Shortens `text` to fit the report column, marking the cut with `...`
pub fn abbreviate(text: &str) -> String {
    if text.chars().count() <= ATTRIBUTE_WIDTH {
        return text.to_string();
    }

    let kept: String = text.chars().take(ATTRIBUTE_WIDTH - 3).collect();
    format!("{kept}...")
}

/// One report line for a course whose component hours are `hours`
pub fn report_line(course: &courses::Model, hours: f64) -> String {
    format!(
        "{:06} {} {:>6} {:<8} {} {:<4} {:<20} {:6.1} {:6.1} {}",
        course.course_id,
        course.institution,
        course.discipline,
        course.catalog_number,
        course.course_status,
        course.designation,
        abbreviate(&course.attributes),
        course.contact_hours,
        hours,
        course.components
    )
}

/// Report lines for every mismatched course, in the order given
pub fn mismatches(courses: &[courses::Model]) -> Vec<String> {
    courses
        .iter()
        .filter_map(|course| hours_mismatch(course).map(|hours| report_line(course, hours)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::stored_course;
    use models::course::{Component, ComponentList};

    fn course(contact_hours: f64, components: &[(&str, f64)]) -> courses::Model {
        let mut course = stored_course(1234, "QNS01", "CSCI");
        course.contact_hours = contact_hours;
        course.components = ComponentList::new();
        for (code, hours) in components {
            course.components.push(Component::new(*code, *hours));
        }
        course
    }

    #[test]
    fn test_matching_hours_not_reported() {
        let course = course(5.0, &[("LEC", 3.0), ("LAB", 2.0)]);
        assert_eq!(hours_mismatch(&course), None);
    }

    #[test]
    fn test_mismatch_reported_for_active_only() {
        let mut course = course(4.0, &[("LEC", 3.0)]);
        assert_eq!(hours_mismatch(&course), Some(3.0));

        course.course_status = "I".to_string();
        assert_eq!(hours_mismatch(&course), None);
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("None"), "None");
        assert_eq!(abbreviate("12345678901234567890"), "12345678901234567890");
        assert_eq!(
            abbreviate("QNS:FYS; WRIC:W; AREA:SCI"),
            "QNS:FYS; WRIC:W; ..."
        );
    }

    #[test]
    fn test_report_line() {
        let course = course(4.0, &[("LEC", 3.0)]);
        let lines = mismatches(&[course]);

        assert_eq!(
            lines,
            vec!["001234 QNS01   CSCI 101      A RLA  None                    4.0    3.0 LEC 3.0"]
        );
    }
}
