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

#[cfg(test)]
use mockall::automock;

use crate::parser::{LinkSpan, Severity};

pub mod matcher_gcc;
pub mod matcher_msvc;

/// One successfully parsed diagnostic line, before file-path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
    pub links: Vec<LinkSpan>,
}

#[cfg_attr(test, automock)]
pub trait LineMatcher {
    fn match_line(&self, line: &str) -> Option<MatchedLine>;
}
