//! Column descriptors.
//!
//! A column is either a plain base column or an interaction term built from
//! two or more base columns. The tag is the source of truth: code that needs
//! the base features of a term reads them from the descriptor, it never splits
//! the display name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when rendering interaction terms (`A*B*C`).
///
/// Base column names may not contain it, so a display name always maps back
/// to exactly one descriptor.
pub const INTERACTION_SEPARATOR: char = '*';

/// A dataset column.
///
/// The derived ordering is the candidate identity used for deterministic
/// iteration and tie-breaks: every `Base` sorts before every `Interaction`,
/// bases compare by name and interactions compare their name lists
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    Base(String),
    /// Ordered base names (at least two, all distinct).
    Interaction(Vec<String>),
}

impl Column {
    pub fn base(name: impl Into<String>) -> Self {
        Column::Base(name.into())
    }

    /// Build an interaction descriptor from base names, in the given order.
    ///
    /// The descriptor is not validated here; `Dataset` construction rejects
    /// interactions with fewer than two distinct bases.
    pub fn interaction<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Column::Interaction(names.into_iter().map(Into::into).collect())
    }

    pub fn is_interaction(&self) -> bool {
        matches!(self, Column::Interaction(_))
    }

    /// Number of base columns multiplied together (1 for a base column).
    pub fn degree(&self) -> usize {
        match self {
            Column::Base(_) => 1,
            Column::Interaction(names) => names.len(),
        }
    }

    /// Base names of this column, in order.
    pub fn base_names(&self) -> Vec<&str> {
        match self {
            Column::Base(name) => vec![name.as_str()],
            Column::Interaction(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Base features an interaction term depends on (empty for base columns).
    pub fn base_features(&self) -> Vec<Column> {
        match self {
            Column::Base(_) => Vec::new(),
            Column::Interaction(names) => names.iter().cloned().map(Column::Base).collect(),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Column::Base(name) => name.clone(),
            Column::Interaction(names) => names.join(&INTERACTION_SEPARATOR.to_string()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Base(name) => f.write_str(name),
            Column::Interaction(names) => {
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{INTERACTION_SEPARATOR}")?;
                    }
                    f.write_str(name)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::base(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_display_and_bases() {
        let term = Column::interaction(["A", "B", "C"]);
        assert_eq!(term.display_name(), "A*B*C");
        assert_eq!(term.to_string(), "A*B*C");
        assert_eq!(term.degree(), 3);
        assert_eq!(term.base_names(), vec!["A", "B", "C"]);
        assert_eq!(
            term.base_features(),
            vec![Column::base("A"), Column::base("B"), Column::base("C")]
        );
        assert!(Column::base("A").base_features().is_empty());
    }

    #[test]
    fn ordering_puts_bases_first() {
        let mut cols = vec![
            Column::interaction(["A", "B"]),
            Column::base("z"),
            Column::base("a"),
            Column::interaction(["A", "C"]),
        ];
        cols.sort();
        assert_eq!(
            cols,
            vec![
                Column::base("a"),
                Column::base("z"),
                Column::interaction(["A", "B"]),
                Column::interaction(["A", "C"]),
            ]
        );
    }
}
