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

use lazy_static::lazy_static;
use regex::Regex;

use crate::parser::matcher::{LineMatcher, MatchedLine};
use crate::parser::{LinkSpan, Severity};

/// Matches the gcc/clang shaped diagnostics the build tool echoes, e.g.
/// `error: test/main.cpp:12:3: 'a' was not declared in this scope`.
/// The severity comes from the matched keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct GccClangMatcher;

impl LineMatcher for GccClangMatcher {
    fn match_line(&self, line: &str) -> Option<MatchedLine> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"(error|warning): (.*):(\d+):(\d+): (.*)").unwrap();
        }

        let captures = RE.captures(line)?;

        let severity = match captures.get(1)?.as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Unknown,
        };

        let file = captures.get(2)?;
        let line_number = captures.get(3)?.as_str().parse().ok()?;
        let column = captures.get(4)?.as_str().parse().ok()?;
        let message = captures.get(5)?.as_str().to_string();

        Some(MatchedLine {
            file: file.as_str().to_string(),
            line: Some(line_number),
            column: Some(column),
            severity,
            message,
            links: vec![LinkSpan {
                offset: file.start(),
                length: file.as_str().len(),
            }],
        })
    }
}
