use std::path::{Component, Path, PathBuf};

/// Longest shared prefix of two paths, compared component by component.
///
/// `/a/bc` and `/a/bd` share `/a`, not `/a/b`.
pub fn common_path(lhs: impl AsRef<Path>, rhs: impl AsRef<Path>) -> PathBuf {
    let mut result = PathBuf::new();

    let components = lhs
        .as_ref()
        .components()
        .zip(rhs.as_ref().components())
        .take_while(|(a, b)| a == b);

    for (component, _) in components {
        result.push(component.as_os_str());
    }

    result
}

/// Textual `.`/`..` cleanup, without touching the filesystem.
pub fn lexically_normal(path: impl AsRef<Path>) -> PathBuf {
    let mut parts: Vec<Component> = vec![];

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    let mut result = PathBuf::new();
    for part in parts {
        result.push(part.as_os_str());
    }

    if result.as_os_str().is_empty() && !path.as_ref().as_os_str().is_empty() {
        result.push(".");
    }

    result
}

/// Resolve `path` against `base` if it is relative, then normalize.
pub fn absolutize(path: impl AsRef<Path>, base: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if path.is_absolute() {
        lexically_normal(path)
    } else {
        lexically_normal(base.as_ref().join(path))
    }
}
