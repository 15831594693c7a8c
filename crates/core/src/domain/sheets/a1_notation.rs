use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl A1Notation {
    /// The whole worksheet, e.g. `'condition2025'`.
    pub fn sheet(title: &str) -> Self {
        A1Notation(quote_sheet_title(title))
    }

    /// A single cell of a worksheet, e.g. `'condition2025'!A1`.
    pub fn cell(title: &str, cell: &str) -> Self {
        A1Notation(format!("{}!{}", quote_sheet_title(title), cell))
    }
}

/// Sheet titles are always single quoted; embedded quotes are doubled.
fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet() {
        assert_eq!(A1Notation::sheet("condition2025").as_ref(), "'condition2025'");
    }

    #[test]
    fn test_cell() {
        assert_eq!(
            A1Notation::cell("condition2025", "A1").to_string(),
            "'condition2025'!A1"
        );
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(A1Notation::sheet("Sato's log").as_ref(), "'Sato''s log'");
    }

    #[test]
    fn test_non_ascii_title() {
        assert_eq!(A1Notation::cell("体調", "A1").as_ref(), "'体調'!A1");
    }
}
