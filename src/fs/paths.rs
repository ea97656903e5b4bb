//! Lexical path helpers.
//!
//! Paths handed to the explorer are always cleaned: no `.` components, no
//! `..` that could be folded into its parent, no trailing separator. Nothing
//! here touches the filesystem except [`absolute`], which may consult the
//! working directory.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` components without resolving symlinks.
///
/// `..` at the root stays at the root; a leading `..` on a relative path is
/// kept since there is nothing to fold it into.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Join `name` onto `base` and clean the result.
pub fn join(base: &Path, name: impl AsRef<Path>) -> PathBuf {
    clean(&base.join(name))
}

/// Parent of `path`. The parent of a filesystem root is the root itself.
pub fn parent(path: &Path) -> PathBuf {
    join(path, "..")
}

/// Make `path` absolute against the working directory and clean it.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    Ok(clean(&std::path::absolute(path)?))
}
