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

#[derive(Debug, Clone, Default)]
pub struct ProjectSettings {
    /// Directory holding the top-level build descriptor file.
    pub source_directory: PathBuf,

    /// Directory relative descriptor paths resolve against.
    pub project_directory: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct ParserSettings {
    pub dialect: Dialect,
    pub source_directory: Option<PathBuf>,
}

/// Build-output line format, fixed at parser construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Msvc,
    GccClang,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::GccClang
    }
}
