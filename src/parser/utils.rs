//! Label escaping and unescaping for Newick notation.
//!
//! Node names may contain characters that carry meaning in Newick strings
//! (brackets, separators, colons, quotes). These helpers quote such names when
//! writing and undo the underscore convention when reading.

/// Characters that force a name to be single quoted when written.
const SPECIAL_CHARS: &[char] = &[
    ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks whether a name can be written verbatim, that is, it is non-empty
/// and contains neither whitespace, underscores nor any Newick special character.
///
/// # Examples
/// ```
/// # use dendrick::parser::utils::is_plain;
/// assert!(is_plain("Kea"));
/// assert!(!is_plain("Nestor_notabilis"));
/// assert!(!is_plain("Nestor notabilis"));
/// assert!(!is_plain("clade:1"));
/// assert!(!is_plain(""));
/// ```
pub fn is_plain(label: &str) -> bool {
    !label.is_empty()
        && !label
            .chars()
            .any(|c| c.is_whitespace() || c == '_' || SPECIAL_CHARS.contains(&c))
}

/// Escapes a name for use in a Newick string.
///
/// Names that are not [plain](is_plain) are wrapped in single quotes, with
/// internal single quotes doubled. Quoted names are read back verbatim, so
/// spaces and underscores stay distinct and an empty name stays a name.
///
/// # Examples
/// ```
/// # use dendrick::parser::utils::escape_label;
/// assert_eq!(escape_label("Kea"), "Kea");
/// assert_eq!(escape_label("Nestor notabilis"), "'Nestor notabilis'");
/// assert_eq!(escape_label("Nestor_notabilis"), "'Nestor_notabilis'");
/// assert_eq!(escape_label("cluster (3)"), "'cluster (3)'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label(""), "''");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_plain(label) {
        label.to_string()
    } else {
        format!("'{}'", label.replace('\'', "''"))
    }
}

/// Unescapes an unquoted Newick name by turning underscores into spaces.
///
/// Quoted names are already unquoted by the
/// [ByteParser](crate::parser::ByteParser) and must not go through this.
///
/// # Examples
/// ```
/// # use dendrick::parser::utils::unescape_label;
/// assert_eq!(unescape_label("Nestor_notabilis"), "Nestor notabilis");
/// assert_eq!(unescape_label("Kea"), "Kea");
/// ```
pub fn unescape_label(label: &str) -> String {
    label.replace('_', " ")
}
