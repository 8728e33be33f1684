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

use std::path::{Path, PathBuf};

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Source,
    Header,
    Unknown,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    App,
    Lib,
}

/// Visual category stand-in for the IDE's icon assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconTag {
    Directory,
    Modules,
    Sources,
    FileC,
    FileCpp,
    FileHeader,
    FileGeneric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    ProjectRoot,
    Target(ProductType),
    Group,
    SourceGroup,
    Folder,
    File(FileType),
}

/// One node of the project tree. Children are exclusively owned; sibling
/// paths are unique by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub path: PathBuf,
    pub display_name: String,
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub is_sources_or_headers: bool,
    pub list_in_project: bool,
    pub icon: IconTag,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        match self.kind {
            NodeKind::File(_) => false,
            _ => true,
        }
    }

    pub fn is_group(&self) -> bool {
        match self.kind {
            NodeKind::Group => true,
            _ => false,
        }
    }

    fn is_plain_folder(&self) -> bool {
        match self.kind {
            NodeKind::Folder => true,
            _ => false,
        }
    }

    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Depth-first search over the whole tree, this node included.
    pub fn find_node<F: Fn(&Node) -> bool>(&self, predicate: &F) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }

        for child in &self.children {
            if let Some(found) = child.find_node(predicate) {
                return Some(found);
            }
        }

        None
    }

    pub fn find_node_mut<F: Fn(&Node) -> bool>(&mut self, predicate: &F) -> Option<&mut Node> {
        if predicate(self) {
            return Some(self);
        }

        for child in &mut self.children {
            if let Some(found) = child.find_node_mut(predicate) {
                return Some(found);
            }
        }

        None
    }

    /// Insert a file leaf beneath this folder, materializing the folder
    /// nodes between this folder's path and the file's directory on
    /// demand. A file whose path is already present is not inserted
    /// twice.
    pub fn add_nested_file(&mut self, file: Node) {
        let directory = match file.path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.path.clone(),
        };

        let folder = self.materialize_folders(&directory);
        if folder.children.iter().all(|child| child.path != file.path) {
            folder.children.push(file);
        }
    }

    fn materialize_folders(&mut self, directory: &Path) -> &mut Node {
        let parts: Vec<_> = match directory.strip_prefix(&self.path) {
            Ok(relative) => relative
                .components()
                .map(|component| component.as_os_str().to_os_string())
                .collect(),
            Err(_) => vec![],
        };

        let mut current = self;
        let mut current_path = current.path.clone();

        for part in parts {
            current_path.push(&part);

            let index = match current
                .children
                .iter()
                .position(|child| child.is_folder() && child.path == current_path)
            {
                Some(index) => index,
                None => {
                    current.children.push(folder_node(
                        current_path.clone(),
                        part.to_string_lossy().into_owned(),
                    ));
                    current.children.len() - 1
                }
            };

            current = &mut current.children[index];
        }

        current
    }

    /// Collapse chains of single-child pass-through folders beneath this
    /// node. Running it a second time changes nothing.
    pub fn compress(&mut self) {
        for child in &mut self.children {
            if child.is_plain_folder() {
                child.absorb_single_child_folders();
            }
        }
    }

    fn absorb_single_child_folders(&mut self) {
        while self.children.len() == 1 && self.children[0].is_plain_folder() {
            let child = self.children.pop().unwrap();

            self.display_name = format!("{}/{}", self.display_name, child.display_name);
            self.path = child.path;
            self.children = child.children;
        }

        for child in &mut self.children {
            if child.is_plain_folder() {
                child.absorb_single_child_folders();
            }
        }
    }
}

const HEADER_EXTENSIONS: [&str; 7] = ["h", "hpp", "hxx", "tpp", "ixx", "inl", "mpp"];

/// Whether the file is a header (or module interface) that must never be
/// classified as a compiled source.
pub fn is_header_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| HEADER_EXTENSIONS.contains(&extension))
}

pub fn project_root(path: impl Into<PathBuf>) -> Node {
    let path = path.into();
    let display_name = file_name(&path);

    Node {
        path,
        display_name,
        kind: NodeKind::ProjectRoot,
        children: vec![],
        is_sources_or_headers: false,
        list_in_project: true,
        icon: IconTag::Directory,
    }
}

pub fn target_node(
    path: impl Into<PathBuf>,
    name: impl Into<String>,
    product: ProductType,
) -> Node {
    Node {
        path: path.into(),
        display_name: name.into(),
        kind: NodeKind::Target(product),
        children: vec![],
        is_sources_or_headers: false,
        list_in_project: true,
        icon: IconTag::Directory,
    }
}

/// Fails on an empty path; the caller skips attaching.
pub fn virtual_folder(path: impl Into<PathBuf>, name: impl Into<String>) -> Option<Node> {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return None;
    }

    Some(Node {
        path,
        display_name: name.into(),
        kind: NodeKind::Group,
        children: vec![],
        is_sources_or_headers: false,
        list_in_project: false,
        icon: IconTag::Directory,
    })
}

pub fn group_folder(path: impl Into<PathBuf>, name: impl Into<String>) -> Option<Node> {
    let mut node = virtual_folder(path, name)?;

    debug!("Group node '{}' {}", node.display_name, node.path.display());
    node.icon = IconTag::Modules;

    Some(node)
}

pub fn source_group_folder(path: impl Into<PathBuf>, name: impl Into<String>) -> Option<Node> {
    let mut node = virtual_folder(path, name)?;

    debug!(
        "Source group node '{}' {}",
        node.display_name,
        node.path.display()
    );
    node.kind = NodeKind::SourceGroup;
    node.is_sources_or_headers = true;
    node.icon = IconTag::Sources;

    Some(node)
}

pub fn file_leaf(path: impl Into<PathBuf>, requested: FileType) -> Node {
    let path = path.into();
    let file_type = classify(&path, requested);
    let icon = file_icon(&path, file_type);
    let display_name = file_name(&path);

    Node {
        path,
        display_name,
        kind: NodeKind::File(file_type),
        children: vec![],
        is_sources_or_headers: match file_type {
            FileType::Source | FileType::Header => true,
            _ => false,
        },
        list_in_project: true,
        icon,
    }
}

/// Fails on an empty path; one leaf per package, then per framework.
pub fn external_packages_folder(
    path: impl Into<PathBuf>,
    target_name: &str,
    packages: &[String],
    frameworks: &[String],
) -> Option<Node> {
    let mut parent = virtual_folder(path, "External Packages")?;
    parent.icon = IconTag::Modules;

    for entry in packages.iter().chain(frameworks) {
        let mut node = file_leaf(parent.path.join(entry), FileType::Unknown);
        node.icon = IconTag::Modules;
        node.list_in_project = false;

        debug!("Package node {} for target {}", entry, target_name);
        parent.children.push(node);
    }

    Some(parent)
}

fn folder_node(path: PathBuf, name: String) -> Node {
    debug!("Folder node {}", path.display());

    Node {
        path,
        display_name: name,
        kind: NodeKind::Folder,
        children: vec![],
        is_sources_or_headers: false,
        list_in_project: false,
        icon: IconTag::Directory,
    }
}

fn classify(path: &Path, requested: FileType) -> FileType {
    match requested {
        FileType::Source if is_header_file(path) => FileType::Header,
        other => other,
    }
}

fn file_icon(path: &Path, file_type: FileType) -> IconTag {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or("");

    match file_type {
        FileType::Header if extension == "mpp" => IconTag::FileCpp,
        FileType::Header => IconTag::FileHeader,
        FileType::Source if extension == "c" => IconTag::FileC,
        FileType::Source if extension == "cpp" => IconTag::FileCpp,
        _ => IconTag::FileGeneric,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
