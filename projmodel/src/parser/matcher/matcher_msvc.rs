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

/// Matches cl.exe shaped diagnostics, e.g.
/// `c:\src\a.cpp(10): warning: unused variable`. The dialect never
/// reports a column; the severity is read off the message prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsvcMatcher;

impl LineMatcher for MsvcMatcher {
    fn match_line(&self, line: &str) -> Option<MatchedLine> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"(.+)\((\d+)\): (.+)").unwrap();
        }

        let captures = RE.captures(line)?;

        let file = captures.get(1)?;
        let line_number = captures.get(2)?.as_str().parse().ok()?;
        let message = captures.get(3)?.as_str().to_string();

        // TODO: extract the MSVC error code (e.g. C2065) into its own field
        Some(MatchedLine {
            file: file.as_str().to_string(),
            line: Some(line_number),
            column: None,
            severity: severity_from_message(&message),
            message,
            links: vec![LinkSpan {
                offset: file.start(),
                length: file.as_str().len(),
            }],
        })
    }
}

fn severity_from_message(message: &str) -> Severity {
    let message = message.trim_start().to_ascii_lowercase();

    if message.starts_with("error") || message.starts_with("fatal error") {
        Severity::Error
    } else if message.starts_with("warning") {
        Severity::Warning
    } else {
        Severity::Unknown
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::matcher::{LineMatcher, MatchedLine};
    use crate::parser::{LinkSpan, Severity};

    use super::MsvcMatcher;

    #[test]
    fn matches_a_warning_line() {
        let sut = MsvcMatcher::default();

        let result = sut.match_line(r"c:\src\a.cpp(10): warning: unused variable");

        let expected = MatchedLine {
            file: r"c:\src\a.cpp".to_string(),
            line: Some(10),
            column: None,
            severity: Severity::Warning,
            message: "warning: unused variable".to_string(),
            links: vec![LinkSpan {
                offset: 0,
                length: 12,
            }],
        };

        assert_eq!(Some(expected), result);
    }

    #[test]
    fn matches_an_error_line() {
        let sut = MsvcMatcher::default();

        let result = sut
            .match_line(r"c:\src\main.cpp(42): error C2065: 'a': undeclared identifier")
            .unwrap();

        assert_eq!(Severity::Error, result.severity);
        assert_eq!(r"c:\src\main.cpp", result.file);
        assert_eq!(Some(42), result.line);
        assert_eq!(None, result.column);
    }

    #[test]
    fn fatal_errors_are_error_level() {
        let sut = MsvcMatcher::default();

        let result = sut
            .match_line(r"c:\src\main.cpp(1): fatal error C1083: Cannot open include file")
            .unwrap();

        assert_eq!(Severity::Error, result.severity);
    }

    #[test]
    fn unrecognized_messages_keep_unknown_severity() {
        let sut = MsvcMatcher::default();

        let result = sut
            .match_line(r"c:\src\main.cpp(7): note: see declaration of 'a'")
            .unwrap();

        assert_eq!(Severity::Unknown, result.severity);
    }

    #[test]
    fn ignores_lines_without_a_location() {
        let sut = MsvcMatcher::default();

        assert_eq!(None, sut.match_line("LINK : fatal error LNK1104"));
        assert_eq!(None, sut.match_line("[ 42%] compiling.release src\\main.cpp"));
        assert_eq!(None, sut.match_line(""));
    }
}
