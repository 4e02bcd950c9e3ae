//! Ordering of directory listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::tree::{Entry, Namespace};

/// The column by which entries are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Leaf name, case-sensitive ordinal.
    #[default]
    Name,
    /// File size in bytes; directories by immediate child count.
    Size,
    /// Content-type comment.
    Type,
}

impl SortKey {
    /// The next key in the `s` cycle: Name → Size → Type → Name.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Size,
            Self::Size => Self::Type,
            Self::Type => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Type => "Type",
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to the sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Sorts `entries` by `key` and returns the new order as indices into
/// `entries`.
///
/// The sort is stable and `Descending` inverts the comparator, so entries
/// that compare equal keep their listing order in both directions. When
/// `dirs_first` is `true`, directories precede files whatever the
/// direction.
pub fn sort_indices(
    namespace: &Namespace,
    entries: &[Entry],
    key: SortKey,
    direction: SortDirection,
    dirs_first: bool,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();

    order.sort_by(|&a, &b| {
        let (a, b) = (&entries[a], &entries[b]);
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != Ordering::Equal {
                return dir_cmp;
            }
        }

        let ord = compare_by_key(namespace, a, b, key);

        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    order
}

/// Sorts `entries` by `key`, returning a **new** ordered list. The input
/// slice is never mutated. See [`sort_indices`].
pub fn sort_entries<'a>(
    namespace: &Namespace,
    entries: &'a [Entry],
    key: SortKey,
    direction: SortDirection,
    dirs_first: bool,
) -> Vec<&'a Entry> {
    sort_indices(namespace, entries, key, direction, dirs_first)
        .into_iter()
        .map(|i| &entries[i])
        .collect()
}

fn compare_by_key(namespace: &Namespace, a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name().cmp(b.name()),
        SortKey::Size => namespace.size_key(a).cmp(&namespace.size_key(b)),
        SortKey::Type => namespace
            .content_type(a)
            .comment()
            .cmp(namespace.content_type(b).comment()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::RawEntry;
    use crate::mime::ClassificationGraph;
    use std::sync::Arc;

    fn namespace(entries: &[(&str, u64)]) -> Namespace {
        Namespace::build(
            "test.mpq",
            entries.iter().map(|(p, s)| RawEntry::new(*p, *s)),
            Arc::new(ClassificationGraph::builtin()),
        )
    }

    fn names(sorted: &[&Entry]) -> Vec<String> {
        sorted.iter().map(|e| e.name().to_owned()).collect()
    }

    #[test]
    fn sort_by_name_ascending() {
        let ns = namespace(&[("banana.txt", 1), ("apple.txt", 1), ("cherry.txt", 1)]);
        let sorted = sort_entries(&ns, ns.root(), SortKey::Name, SortDirection::Ascending, false);
        assert_eq!(names(&sorted), vec!["apple.txt", "banana.txt", "cherry.txt"]);
    }

    #[test]
    fn sort_by_name_is_case_sensitive() {
        let ns = namespace(&[("b.txt", 1), ("B.txt", 1), ("a.txt", 1)]);
        let sorted = sort_entries(&ns, ns.root(), SortKey::Name, SortDirection::Ascending, false);
        assert_eq!(names(&sorted), vec!["B.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn sort_by_name_descending() {
        let ns = namespace(&[("a", 1), ("c", 1), ("b", 1)]);
        let sorted = sort_entries(&ns, ns.root(), SortKey::Name, SortDirection::Descending, false);
        assert_eq!(names(&sorted), vec!["c", "b", "a"]);
    }

    #[test]
    fn size_ties_keep_listing_order_in_both_directions() {
        let ns = namespace(&[("a", 5), ("b", 1), ("c", 5)]);

        let asc = sort_entries(&ns, ns.root(), SortKey::Size, SortDirection::Ascending, false);
        assert_eq!(names(&asc), vec!["b", "a", "c"]);

        let desc = sort_entries(&ns, ns.root(), SortKey::Size, SortDirection::Descending, false);
        assert_eq!(names(&desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn directories_sort_by_child_count() {
        let ns = namespace(&[
            ("big\\1", 1),
            ("big\\2", 1),
            ("big\\3", 1),
            ("small\\1", 1),
            ("file", 2),
        ]);
        let sorted = sort_entries(&ns, ns.root(), SortKey::Size, SortDirection::Ascending, false);
        assert_eq!(names(&sorted), vec!["small", "file", "big"]);
    }

    #[test]
    fn sort_by_type_uses_comment() {
        let ns = namespace(&[("z.txt", 1), ("y.blp", 1), ("x.mp3", 1)]);
        let sorted = sort_entries(&ns, ns.root(), SortKey::Type, SortDirection::Ascending, false);
        // "BLP image" < "MP3 audio" < "plain text document"
        assert_eq!(names(&sorted), vec!["y.blp", "x.mp3", "z.txt"]);
    }

    #[test]
    fn dirs_first_ignores_direction() {
        let ns = namespace(&[("b.txt", 1), ("a\\x", 1), ("c.txt", 1)]);
        let asc = sort_entries(&ns, ns.root(), SortKey::Name, SortDirection::Ascending, true);
        assert_eq!(names(&asc), vec!["a", "b.txt", "c.txt"]);

        let desc = sort_entries(&ns, ns.root(), SortKey::Name, SortDirection::Descending, true);
        assert_eq!(names(&desc), vec!["a", "c.txt", "b.txt"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let ns = namespace(&[("b", 1), ("a", 1)]);
        let before = names(&ns.root().iter().collect::<Vec<_>>());
        let _ = sort_entries(&ns, ns.root(), SortKey::Name, SortDirection::Ascending, false);
        let after = names(&ns.root().iter().collect::<Vec<_>>());
        assert_eq!(before, after);
    }

    #[test]
    fn sort_empty_listing() {
        let ns = namespace(&[]);
        let sorted = sort_entries(&ns, ns.root(), SortKey::Type, SortDirection::Descending, true);
        assert!(sorted.is_empty());
    }

    #[test]
    fn sort_indices_match_entries() {
        let ns = namespace(&[("b", 1), ("a", 1)]);
        assert_eq!(
            sort_indices(&ns, ns.root(), SortKey::Name, SortDirection::Ascending, false),
            vec![1, 0]
        );
    }

    #[test]
    fn key_cycle() {
        assert_eq!(SortKey::Name.next(), SortKey::Size);
        assert_eq!(SortKey::Size.next(), SortKey::Type);
        assert_eq!(SortKey::Type.next(), SortKey::Name);
    }

    #[test]
    fn direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggle(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggle(), SortDirection::Ascending);
    }
}
