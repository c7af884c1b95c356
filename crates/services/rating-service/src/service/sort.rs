//! Sortable table views.
//!
//! [`sort`] produces a stably ordered view of borrowed items; [`Sorter`] keeps
//! the `{key, direction}` state behind a column header and toggles it.

use std::cmp::Ordering;

use domain::{Store, User};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// Value of a field as seen by the comparator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortField<'a> {
    Text(&'a str),
    Number(f64),
    Absent,
}

impl SortField<'_> {
    /// Three-way comparison. Text is compared lexicographically and numbers
    /// numerically; absent values sort first; mixed kinds compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortField::Text(a), SortField::Text(b)) => a.cmp(b),
            (SortField::Number(a), SortField::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortField::Absent, SortField::Absent) => Ordering::Equal,
            (SortField::Absent, _) => Ordering::Less,
            (_, SortField::Absent) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

/// Rows that can be ordered by a named column.
pub trait Sortable {
    type Key: Copy + PartialEq;

    fn sort_field(&self, key: Self::Key) -> SortField<'_>;
}

/// Sortable user columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortKey {
    Id,
    Name,
    Email,
    Address,
    Role,
}

impl Sortable for User {
    type Key = UserSortKey;

    fn sort_field(&self, key: UserSortKey) -> SortField<'_> {
        match key {
            UserSortKey::Id => SortField::Number(self.id as f64),
            UserSortKey::Name => SortField::Text(&self.name),
            UserSortKey::Email => SortField::Text(&self.email),
            UserSortKey::Address => SortField::Text(&self.address),
            UserSortKey::Role => SortField::Text(self.role.label()),
        }
    }
}

/// Sortable store columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSortKey {
    Id,
    Name,
    Address,
}

impl Sortable for Store {
    type Key = StoreSortKey;

    fn sort_field(&self, key: StoreSortKey) -> SortField<'_> {
        match key {
            StoreSortKey::Id => SortField::Number(self.id as f64),
            StoreSortKey::Name => SortField::Text(&self.name),
            StoreSortKey::Address => SortField::Text(&self.address),
        }
    }
}

/// Stable sort of a borrowed view; `items` is left untouched.
pub fn sort<'a, T: Sortable>(items: &'a [T], key: T::Key, direction: SortDirection) -> Vec<&'a T> {
    let mut view: Vec<&T> = items.iter().collect();
    view.sort_by(|a, b| {
        let ordering = a.sort_field(key).compare(&b.sort_field(key));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    view
}

/// Column-header sort state.
pub struct Sorter<T: Sortable> {
    config: Option<SortConfig<T::Key>>,
}

impl<T: Sortable> Default for Sorter<T> {
    fn default() -> Self {
        Self { config: None }
    }
}

impl<T: Sortable> Sorter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SortConfig<T::Key>) -> Self {
        Self {
            config: Some(config),
        }
    }

    pub fn config(&self) -> Option<SortConfig<T::Key>> {
        self.config
    }

    /// Descending only when the previous sort was ascending on the same key,
    /// ascending otherwise.
    pub fn request_sort(&mut self, key: T::Key) -> SortConfig<T::Key> {
        let direction = match self.config {
            Some(current)
                if current.key == key && current.direction == SortDirection::Ascending =>
            {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };

        let config = SortConfig { key, direction };
        self.config = Some(config);
        config
    }

    /// Apply the current configuration; without one the original order is kept.
    pub fn sorted<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        match self.config {
            Some(config) => sort(items, config.key, config.direction),
            None => items.iter().collect(),
        }
    }
}
