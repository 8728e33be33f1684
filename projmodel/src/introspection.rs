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

use std::convert::TryFrom;
use std::error::Error;
use std::path::PathBuf;

use itertools::Itertools;
use serde::Deserialize;

use crate::{SourceGroup, Target, TargetKind};

/// Decoded introspection output of the build tool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Introspection {
    pub project_dir: PathBuf,
    pub targets: Vec<Target>,
    pub build_system_files: Vec<PathBuf>,
    pub options: Vec<BuildOption>,
}

/// One configurable build option, data only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct BuildOption {
    pub name: String,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub description: String,
}

const TARGET_KINDS: [&str; 5] = ["binary", "shared", "static", "object", "headeronly"];

pub fn from_json(input: impl AsRef<str>) -> Result<Introspection, Box<dyn Error>> {
    let raw: RawIntrospection = serde_json::from_str(input.as_ref())?;

    let targets: Result<Vec<Target>, _> = raw.targets.into_iter().map(Target::try_from).collect();
    let targets = targets?;

    Ok(Introspection {
        project_dir: raw.project_dir.into(),
        targets,
        build_system_files: raw
            .build_system_files
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        options: raw.options,
    })
}

#[derive(Debug, Deserialize)]
struct RawIntrospection {
    #[serde(default)]
    project_dir: String,

    #[serde(default)]
    targets: Vec<RawTarget>,

    #[serde(default)]
    build_system_files: Vec<String>,

    #[serde(default)]
    options: Vec<BuildOption>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    name: String,
    kind: String,
    defined_in: String,

    #[serde(default)]
    group: String,

    #[serde(default)]
    source_groups: Vec<RawSourceGroup>,

    #[serde(default)]
    headers: Vec<String>,

    #[serde(default)]
    modules: Vec<String>,

    #[serde(default)]
    packages: Vec<String>,

    #[serde(default)]
    frameworks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSourceGroup {
    #[serde(default)]
    name: String,

    #[serde(default)]
    sources: Vec<String>,
}

impl TryFrom<RawTarget> for Target {
    type Error = Box<dyn Error>;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        if raw.name.is_empty() {
            return Err("Field 'name' is empty string.")?;
        }
        if raw.defined_in.is_empty() {
            return Err(format!(
                "Target '{}': field 'defined_in' is empty string.",
                raw.name
            ))?;
        }

        let kind = target_kind(&raw.kind).ok_or_else(|| {
            format!(
                "Target '{}': unknown kind '{}', expected one of {}.",
                raw.name,
                raw.kind,
                TARGET_KINDS.iter().join(", ")
            )
        })?;

        Ok(Target {
            name: raw.name,
            kind,
            defined_in: raw.defined_in.into(),
            group: group_segments(&raw.group),
            sources: raw
                .source_groups
                .into_iter()
                .map(|group| SourceGroup {
                    name: group.name,
                    sources: group.sources,
                })
                .collect(),
            headers: raw.headers,
            modules: raw.modules,
            packages: raw.packages,
            frameworks: raw.frameworks,
        })
    }
}

fn target_kind(kind: &str) -> Option<TargetKind> {
    match kind {
        "binary" => Some(TargetKind::Binary),
        "shared" => Some(TargetKind::Shared),
        "static" => Some(TargetKind::Static),
        "object" => Some(TargetKind::Object),
        "headeronly" => Some(TargetKind::HeaderOnly),
        _ => None,
    }
}

// The tool reports the group as one slash-delimited label.
fn group_segments(group: &str) -> Vec<String> {
    if group.is_empty() {
        return vec![];
    }

    group.split('/').map(String::from).collect()
}
