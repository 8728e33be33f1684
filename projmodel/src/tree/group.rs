/*
   Copyright (C) 2025-2026 by the xmakemap authors

   This file is part of xmakemap.

   xmakemap is a tool to turn xmake introspection data into IDE-ready
   project models.

   xmakemap is free software: you can redistribute it and/or modify
   it under the terms of the GNU General Public License as published by
   the Free Software Foundation, either version 3 of the License, or
   (at your option) any later version.

   xmakemap is distributed in the hope that it will be useful,
   but WITHOUT ANY WARRANTY; without even the implied warranty of
   MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
   GNU General Public License for more details.

   You should have received a copy of the GNU General Public License
   along with xmakemap.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::path::PathBuf;

use log::warn;

use crate::tree::node::{group_folder, Node};

/// Find or create the chain of group nodes for `group`, memoized by a
/// whole-tree path search. Returns the path of the resolved group node;
/// `None` means "no group" and the caller attaches directly under the
/// root. A group path already taken by a non-group node skips creation.
pub fn find_or_create_group(root: &mut Node, group: &[String]) -> Option<PathBuf> {
    if group.is_empty() || group[0].is_empty() || group[0] == "." {
        return None;
    }

    let path: PathBuf = group.iter().collect();

    if let Some(existing) = root.find_node(&|node: &Node| node.path == path) {
        if existing.is_group() {
            return Some(path);
        }

        warn!(
            "group path {} already taken by a non-group node, group creation skipped",
            path.display()
        );
        return None;
    }

    let parent_path = find_or_create_group(root, &group[..group.len() - 1]);

    let node = group_folder(path.clone(), group[group.len() - 1].clone())?;

    match parent_path {
        Some(parent_path) => {
            // created by the recursive call above, so it must be present.
            if let Some(parent) = root.find_node_mut(&|node: &Node| node.path == parent_path) {
                parent.add_child(node);
            }
        }
        None => root.add_child(node),
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::tree::node::{self, FileType, NodeKind};

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().copied().map(String::from).collect()
    }

    #[test]
    fn no_group_for_degenerate_paths() {
        let mut root = node::project_root("/proj");

        assert_eq!(None, super::find_or_create_group(&mut root, &[]));
        assert_eq!(None, super::find_or_create_group(&mut root, &segments(&[""])));
        assert_eq!(
            None,
            super::find_or_create_group(&mut root, &segments(&["."]))
        );
        assert!(root.children.is_empty());
    }

    #[test]
    fn creates_the_whole_chain() {
        let mut root = node::project_root("/proj");

        let path = super::find_or_create_group(&mut root, &segments(&["a", "b"]));
        assert_eq!(Some(PathBuf::from("a/b")), path);

        assert_eq!(1, root.children.len());
        let a = &root.children[0];
        assert_eq!(NodeKind::Group, a.kind);
        assert_eq!(PathBuf::from("a"), a.path);

        assert_eq!(1, a.children.len());
        let b = &a.children[0];
        assert_eq!(NodeKind::Group, b.kind);
        assert_eq!(PathBuf::from("a/b"), b.path);
    }

    #[test]
    fn resolving_twice_returns_the_same_node() {
        let mut root = node::project_root("/proj");

        let first = super::find_or_create_group(&mut root, &segments(&["a", "b"]));
        let second = super::find_or_create_group(&mut root, &segments(&["a", "b"]));

        assert_eq!(first, second);
        assert_eq!(1, root.children.len());
        assert_eq!(1, root.children[0].children.len());
    }

    #[test]
    fn reuses_an_existing_parent() {
        let mut root = node::project_root("/proj");

        super::find_or_create_group(&mut root, &segments(&["a"]));
        super::find_or_create_group(&mut root, &segments(&["a", "b"]));

        assert_eq!(1, root.children.len());
        let a = &root.children[0];
        assert_eq!(1, a.children.len());
        assert_eq!(Path::new("a/b"), a.children[0].path.as_path());
    }

    #[test]
    fn group_path_taken_by_a_non_group_node_is_skipped() {
        let mut root = node::project_root("/proj");
        root.add_child(node::file_leaf("a", FileType::Unknown));

        assert_eq!(
            None,
            super::find_or_create_group(&mut root, &segments(&["a"]))
        );
        assert_eq!(1, root.children.len());
    }
}
