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

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::configuration::ProjectSettings;
use crate::tree::node::{FileType, Node, ProductType};
use crate::{Target, TargetKind};

pub mod group;
pub mod node;

pub fn product_type(kind: TargetKind) -> ProductType {
    match kind {
        TargetKind::Binary => ProductType::App,
        TargetKind::Shared
        | TargetKind::Static
        | TargetKind::Object
        | TargetKind::HeaderOnly => ProductType::Lib,
    }
}

/// Assembles the project tree from the introspected target list.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    settings: ProjectSettings,
}

impl TreeBuilder {
    pub fn new(settings: ProjectSettings) -> Self {
        Self { settings }
    }

    pub fn build(&self, targets: &[Target], build_files: &[PathBuf]) -> Node {
        let mut project = node::project_root(self.settings.source_directory.clone());
        let mut target_directories = BTreeSet::new();

        debug!("{} target(s) found", targets.len());

        for target in targets {
            let group_path = group::find_or_create_group(&mut project, &target.group);

            let target_node = self.build_target(target);
            target_directories.insert(target_node.path.clone());

            attach(&mut project, group_path.as_deref(), target_node);
        }

        for build_file in build_files {
            self.attach_build_file(&mut project, build_file);
        }

        debug!("target directories: {:?}", target_directories);

        project
    }

    fn build_target(&self, target: &Target) -> Node {
        let defined_in = util::absolutize(&target.defined_in, &self.settings.source_directory);
        let directory = defined_in
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.source_directory.clone());

        debug!(
            "Target node {} defined in {}",
            target.name,
            defined_in.display()
        );

        let mut target_node =
            node::target_node(directory.clone(), &target.name, product_type(target.kind));

        self.attach_source_files(&mut target_node, target);
        self.attach_module_files(&mut target_node, target);
        self.attach_header_files(&mut target_node, target);
        self.attach_packages(&mut target_node, &directory, target);

        target_node
    }

    fn attach_source_files(&self, parent: &mut Node, target: &Target) {
        let files: Vec<_> = target
            .sources
            .iter()
            .flat_map(|group| &group.sources)
            .map(|source| util::absolutize(source, &self.settings.project_directory))
            .collect();

        let mut folder = match node::source_group_folder(common_root(&files), "Source Files") {
            Some(folder) => folder,
            None => return,
        };

        for file in files {
            if node::is_header_file(&file) {
                continue;
            }

            debug!("Source node {}", file.display());
            folder.add_nested_file(node::file_leaf(file, FileType::Source));
        }

        parent.add_child(folder);
    }

    fn attach_module_files(&self, parent: &mut Node, target: &Target) {
        if target.modules.is_empty() {
            return;
        }

        let files: Vec<_> = target
            .modules
            .iter()
            .map(|module| util::absolutize(module, &self.settings.project_directory))
            .collect();

        let mut folder = match node::source_group_folder(common_root(&files), "Module Files") {
            Some(folder) => folder,
            None => return,
        };

        for file in files {
            debug!("Module node {}", file.display());
            folder.add_nested_file(node::file_leaf(file, FileType::Source));
        }

        folder.compress();

        parent.add_child(folder);
    }

    fn attach_header_files(&self, parent: &mut Node, target: &Target) {
        if target.headers.is_empty() {
            return;
        }

        let files: Vec<_> = target
            .headers
            .iter()
            .map(|header| util::absolutize(header, &self.settings.project_directory))
            .collect();

        let mut folder = match node::source_group_folder(common_root(&files), "Header Files") {
            Some(folder) => folder,
            None => return,
        };

        for file in files {
            debug!("Header node {}", file.display());
            folder.add_nested_file(node::file_leaf(file, FileType::Header));
        }

        parent.add_child(folder);
    }

    fn attach_packages(&self, parent: &mut Node, directory: &Path, target: &Target) {
        if target.packages.is_empty() && target.frameworks.is_empty() {
            return;
        }

        let folder = node::external_packages_folder(
            directory,
            &target.name,
            &target.packages,
            &target.frameworks,
        );

        if let Some(folder) = folder {
            parent.add_child(folder);
        }
    }

    fn attach_build_file(&self, project: &mut Node, build_file: &Path) {
        let file = util::absolutize(build_file, &self.settings.source_directory);
        let directory = match file.parent() {
            Some(parent) => parent.to_path_buf(),
            None => return,
        };

        let folder =
            project.find_node_mut(&|node: &Node| node.is_folder() && node.path == directory);

        match folder {
            Some(folder) => {
                if folder.children.iter().all(|child| child.path != file) {
                    debug!("Project file node {}", file.display());
                    folder.add_child(node::file_leaf(file, FileType::Project));
                }
            }
            None => debug!("no folder found for build file {}, dropped", file.display()),
        }
    }
}

/// Common ancestor directory of a set of files, compared component by
/// component; empty when `paths` is empty.
pub fn common_root(paths: &[PathBuf]) -> PathBuf {
    let mut directories = paths.iter().map(|path| {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });

    let mut base = match directories.next() {
        Some(directory) => directory,
        None => return PathBuf::new(),
    };

    for directory in directories {
        base = util::common_path(&base, &directory);
    }

    base
}

fn attach(project: &mut Node, parent_path: Option<&Path>, node: Node) {
    let node = match parent_path {
        Some(path) => match attach_under(project, path, node) {
            Ok(()) => return,
            Err(node) => node,
        },
        None => node,
    };

    project.add_child(node);
}

fn attach_under(project: &mut Node, parent_path: &Path, node: Node) -> Result<(), Node> {
    match project.find_node_mut(&|candidate: &Node| candidate.path == parent_path) {
        Some(parent) => {
            parent.add_child(node);
            Ok(())
        }
        None => Err(node),
    }
}
