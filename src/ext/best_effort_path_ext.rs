use std::path::{Component, Path, PathBuf};

/// Renders `path` as absolute as possible, for messages.
///
/// Existing paths are canonicalized. Paths that do not exist yet, such as an
/// output file about to be created, are made absolute and have their `.` and
/// `..` components folded away lexically.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical) = path.canonicalize() {
        return canonical.display().to_string();
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(folded.components().next_back(), Some(Component::RootDir) | None) {
                    folded.pop();
                }
            }
            other => folded.push(other),
        }
    }
    folded.display().to_string()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
