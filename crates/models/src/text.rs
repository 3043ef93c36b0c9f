/// Replaces straight apostrophes with typographic ones
pub fn typographic(s: &str) -> String {
    s.replace('\'', "’")
}

/// Cleans a catalog title for storage.
///
/// Carriage returns are dropped, line feeds become spaces, and a space
/// directly after an opening parenthesis is removed.
pub fn clean_title(title: &str) -> String {
    typographic(title)
        .replace('\r', "")
        .replace('\n', " ")
        .replace("( ", "(")
}
