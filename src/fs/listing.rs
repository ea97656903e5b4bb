use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// Appended to the display name of every directory.
pub const DIR_MARKER: char = '/';

/// Number of synthetic entries (`.` and `..`) at the head of every listing.
pub const SYNTHETIC_COUNT: usize = 2;

/// A raw directory child as reported by a [`DirSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    pub name: OsString,
    pub is_dir: bool,
}

impl DirChild {
    pub fn new(name: impl Into<OsString>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Source of directory listings.
pub trait DirSource {
    /// List the immediate children of `dir`, in no particular order.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirChild>>;
}

/// Lists directories from the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl DirSource for FsSource {
    /// Children whose metadata cannot be read are skipped.
    /// Symlinks are reported by their own type, not their target's.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let is_dir = match entry.file_type() {
                Ok(ft) => ft.is_dir(),
                Err(_) => continue,
            };
            children.push(DirChild::new(entry.file_name(), is_dir));
        }
        Ok(children)
    }
}

/// One row of the explorer listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name shown to the user; directories carry a trailing [`DIR_MARKER`].
    pub display_name: String,
    /// Name on disk, used when joining paths.
    pub file_name: OsString,
    pub is_dir: bool,
}

impl Entry {
    fn from_child(child: DirChild) -> Self {
        let mut display_name = child.name.to_string_lossy().into_owned();
        if child.is_dir {
            display_name.push(DIR_MARKER);
        }
        Self {
            display_name,
            file_name: child.name,
            is_dir: child.is_dir,
        }
    }

    fn synthetic(name: &str) -> Self {
        Self {
            display_name: name.to_string(),
            file_name: OsString::from(name),
            is_dir: true,
        }
    }
}

/// Directories first, then by display name in byte order.
fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.display_name.cmp(&b.display_name))
}

/// Build the visible listing: keep children whose display name contains
/// `filter`, sort them, and prepend `.` and `..`.
pub fn build_entries(children: Vec<DirChild>, filter: &str) -> Vec<Entry> {
    let mut matched: Vec<Entry> = children
        .into_iter()
        .map(Entry::from_child)
        .filter(|entry| entry.display_name.contains(filter))
        .collect();
    matched.sort_by(compare_entries);

    let mut entries = Vec::with_capacity(matched.len() + SYNTHETIC_COUNT);
    entries.push(Entry::synthetic("."));
    entries.push(Entry::synthetic(".."));
    entries.extend(matched);
    entries
}

/// In-memory listings for tests. Unknown directories fail with `NotFound`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySource {
    dirs: std::collections::HashMap<std::path::PathBuf, Vec<DirChild>>,
}

#[cfg(test)]
impl MemorySource {
    pub fn with_dir(mut self, path: &str, children: &[(&str, bool)]) -> Self {
        let children = children
            .iter()
            .map(|(name, is_dir)| DirChild::new(*name, *is_dir))
            .collect();
        self.dirs.insert(std::path::PathBuf::from(path), children);
        self
    }
}

#[cfg(test)]
impl DirSource for MemorySource {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirChild>> {
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.display_name.as_str()).collect()
    }

    fn scenario_children() -> Vec<DirChild> {
        vec![
            DirChild::new("b.txt", false),
            DirChild::new("a.txt", false),
            DirChild::new("Z", true),
        ]
    }

    #[test]
    fn dirs_first_then_byte_order() {
        let entries = build_entries(scenario_children(), "");
        assert_eq!(names(&entries), vec![".", "..", "Z/", "a.txt", "b.txt"]);
    }

    #[test]
    fn filter_is_case_sensitive_substring() {
        let entries = build_entries(scenario_children(), "a");
        assert_eq!(names(&entries), vec![".", "..", "a.txt"]);

        let entries = build_entries(scenario_children(), "A");
        assert_eq!(names(&entries), vec![".", ".."]);
    }

    #[test]
    fn filter_matches_directory_marker() {
        let entries = build_entries(scenario_children(), "Z/");
        assert_eq!(names(&entries), vec![".", "..", "Z/"]);
    }

    #[test]
    fn synthetic_entries_survive_any_filter() {
        let entries = build_entries(scenario_children(), "no-such-name");
        assert_eq!(names(&entries), vec![".", ".."]);
        assert!(entries.iter().all(|e| e.is_dir));
    }

    #[test]
    fn uppercase_sorts_before_lowercase() {
        let children = vec![
            DirChild::new("beta", true),
            DirChild::new("Alpha", true),
            DirChild::new("zeta.rs", false),
            DirChild::new("Main.rs", false),
        ];
        let entries = build_entries(children, "");
        assert_eq!(
            names(&entries),
            vec![".", "..", "Alpha/", "beta/", "Main.rs", "zeta.rs"]
        );
    }

    #[test]
    fn every_directory_precedes_every_file() {
        let children = vec![
            DirChild::new("a", false),
            DirChild::new("z", true),
            DirChild::new("m", false),
            DirChild::new("b", true),
        ];
        let entries = build_entries(children, "");
        let first_file = entries.iter().position(|e| !e.is_dir).unwrap();
        assert!(entries[first_file..].iter().all(|e| !e.is_dir));
        let real = &entries[SYNTHETIC_COUNT..first_file];
        assert!(real.windows(2).all(|w| w[0].display_name <= w[1].display_name));
    }

    #[test]
    fn fs_source_reports_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("file.txt")).unwrap();

        let mut children = FsSource.list(dir.path()).unwrap();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            children,
            vec![DirChild::new("file.txt", false), DirChild::new("sub", true)]
        );
    }

    #[test]
    fn fs_source_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = FsSource.list(&dir.path().join("gone"));
        assert!(result.is_err());
    }

    #[test]
    fn memory_source_lists_registered_dirs() {
        let source = MemorySource::default().with_dir("/root", &[("a", false)]);
        assert_eq!(source.list(Path::new("/root")).unwrap().len(), 1);
        assert!(source.list(Path::new("/other")).is_err());
    }

    fn generated_children(raw: Vec<(String, bool)>) -> Vec<DirChild> {
        raw.into_iter()
            .filter(|(name, _)| !name.is_empty() && !name.contains('/'))
            .map(|(name, is_dir)| DirChild::new(name, is_dir))
            .collect()
    }

    quickcheck::quickcheck! {
        fn directories_then_byte_order(raw: Vec<(String, bool)>) -> bool {
            let entries = build_entries(generated_children(raw), "");
            entries[SYNTHETIC_COUNT..].windows(2).all(|pair| {
                let (a, b) = (&pair[0], &pair[1]);
                (a.is_dir && !b.is_dir)
                    || (a.is_dir == b.is_dir && a.display_name.as_bytes() <= b.display_name.as_bytes())
            })
        }

        fn filter_keeps_exactly_the_substring_matches(raw: Vec<(String, bool)>, filter: String) -> bool {
            let children = generated_children(raw);
            let mut expected: Vec<String> = children
                .iter()
                .map(|c| Entry::from_child(c.clone()).display_name)
                .filter(|name| name.contains(filter.as_str()))
                .collect();
            expected.sort();

            let entries = build_entries(children, &filter);
            let mut shown: Vec<String> = entries[SYNTHETIC_COUNT..]
                .iter()
                .map(|e| e.display_name.clone())
                .collect();
            shown.sort();
            names(&entries[..SYNTHETIC_COUNT]) == [".", ".."] && shown == expected
        }

        fn short_filters_over_ascii_names(raw: Vec<(u8, bool)>, filter: u8) -> bool {
            // Small alphabets so that filters actually hit.
            let children: Vec<DirChild> = raw
                .into_iter()
                .map(|(b, is_dir)| DirChild::new(format!("{}{}", (b'a' + b % 3) as char, b % 5), is_dir))
                .collect();
            let filter = ((b'a' + filter % 3) as char).to_string();
            let expected = children
                .iter()
                .filter(|c| c.name.to_string_lossy().contains(filter.as_str()))
                .count();
            build_entries(children, &filter).len() == expected + SYNTHETIC_COUNT
        }
    }
}
