//! Keyword search over fetched universe rows.
//!
//! Pure and synchronous: every function borrows the rows and returns
//! references into them.

use std::collections::HashSet;

use super::universe::UniverseRow;

/// Substring search over a slice of [`UniverseRow`]s.
///
/// A row whose field is unset or empty never matches a search on that field.
///
/// # Examples
/// ```
/// use dp_gateway::domain::{UniverseRow, UniverseSearch};
///
/// let rows = vec![UniverseRow {
///     primary_ric: Some("MSFT.O".to_owned()),
///     ..UniverseRow::default()
/// }];
/// let search = UniverseSearch::new(&rows);
/// assert_eq!(search.by_primary_ric("MSFT").len(), 1);
/// assert!(search.by_common_name("MSFT").is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UniverseSearch<'a> {
    rows: &'a [UniverseRow],
}

impl<'a> UniverseSearch<'a> {
    /// Search over `rows`.
    pub fn new(rows: &'a [UniverseRow]) -> Self {
        Self { rows }
    }

    /// Rows whose PermId contains `keyword`.
    pub fn by_perm_id(&self, keyword: &str) -> Vec<&'a UniverseRow> {
        self.matching(keyword, |row| row.perm_id.as_deref())
    }

    /// Rows whose primary RIC contains `keyword`.
    pub fn by_primary_ric(&self, keyword: &str) -> Vec<&'a UniverseRow> {
        self.matching(keyword, |row| row.primary_ric.as_deref())
    }

    /// Rows whose common name contains `keyword`.
    pub fn by_common_name(&self, keyword: &str) -> Vec<&'a UniverseRow> {
        self.matching(keyword, |row| row.common_name.as_deref())
    }

    /// RIC matches, then common-name matches, then PermId matches, with a
    /// row matched by several fields kept only at its first occurrence.
    ///
    /// Rows are told apart by position, so equal rows from the upstream are
    /// all kept.
    pub fn search(&self, keyword: &str) -> Vec<&'a UniverseRow> {
        let mut seen = HashSet::new();
        self.by_primary_ric(keyword)
            .into_iter()
            .chain(self.by_common_name(keyword))
            .chain(self.by_perm_id(keyword))
            .filter(|row| seen.insert(std::ptr::from_ref(*row)))
            .collect()
    }

    fn matching<F>(&self, keyword: &str, field: F) -> Vec<&'a UniverseRow>
    where
        F: Fn(&UniverseRow) -> Option<&str>,
    {
        self.rows
            .iter()
            .filter(|row| {
                field(row).is_some_and(|value| !value.is_empty() && value.contains(keyword))
            })
            .collect()
    }
}
