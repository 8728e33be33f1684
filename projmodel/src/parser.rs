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

use std::error::Error;
use std::path::PathBuf;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::configuration::{Dialect, ParserSettings};
use crate::parser::matcher::{
    matcher_gcc::GccClangMatcher, matcher_msvc::MsvcMatcher, LineMatcher, MatchedLine,
};

pub mod matcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOrigin {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    pub severity: Severity,
    pub message: String,
    pub fatal: bool,
}

/// Byte range of an actionable file reference within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkSpan {
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Progress(i32),
    Diagnostic {
        diagnostic: Diagnostic,
        links: Vec<LinkSpan>,
    },
}

/// Streaming build-output parser. Constructed once per build run, fed
/// lines until the stream ends, then queried for its sticky flags.
pub struct BuildOutputParser {
    matcher: Box<dyn LineMatcher>,
    source_directory: Option<PathBuf>,
    has_fatal_errors: bool,
    has_detected_redirection: bool,
}

impl BuildOutputParser {
    pub fn new(settings: ParserSettings) -> Self {
        let matcher: Box<dyn LineMatcher> = match settings.dialect {
            Dialect::Msvc => Box::new(MsvcMatcher::default()),
            Dialect::GccClang => Box::new(GccClangMatcher::default()),
        };

        Self::with_matcher(matcher, settings.source_directory)
    }

    fn with_matcher(matcher: Box<dyn LineMatcher>, source_directory: Option<PathBuf>) -> Self {
        Self {
            matcher,
            source_directory,
            has_fatal_errors: false,
            has_detected_redirection: false,
        }
    }

    /// Set once before the first line is processed.
    pub fn set_source_directory(&mut self, source_directory: impl Into<PathBuf>) {
        self.source_directory = Some(source_directory.into());
    }

    pub fn handle_line(&mut self, line: &str, origin: StreamOrigin) -> Option<OutputEvent> {
        if let Some(progress) = extract_progress(line) {
            debug!("progress {}% ({:?})", progress, origin);
            return Some(OutputEvent::Progress(progress));
        }

        if let Some(matched) = self.matcher.match_line(line) {
            return Some(self.diagnostic_event(matched));
        }

        if is_redirection(line) {
            debug!("redirection detected: {}", line);
            self.has_detected_redirection = true;
        }

        None
    }

    /// Sticky; authoritative once the stream has ended.
    pub fn has_fatal_errors(&self) -> bool {
        self.has_fatal_errors
    }

    /// Sticky; true once the build tool echoed another driver's output.
    pub fn has_detected_redirection(&self) -> bool {
        self.has_detected_redirection
    }

    fn diagnostic_event(&mut self, matched: MatchedLine) -> OutputEvent {
        let file = if matched.file.is_empty() {
            None
        } else {
            let path = PathBuf::from(&matched.file);

            match &self.source_directory {
                Some(source_directory) if path.is_relative() => {
                    Some(util::absolutize(&path, source_directory))
                }
                _ => Some(path),
            }
        };

        let fatal = matched.severity == Severity::Error;
        if fatal {
            self.has_fatal_errors = true;
        }

        let diagnostic = Diagnostic {
            file,
            line: matched.line,
            column: matched.column,
            severity: matched.severity,
            message: matched.message,
            fatal,
        };

        OutputEvent::Diagnostic {
            diagnostic,
            links: matched.links,
        }
    }
}

/// Serialize collected diagnostics as a JSON problems list.
pub fn diagnostics_to_json<'a>(
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
) -> Result<String, Box<dyn Error>> {
    let collected: Vec<_> = diagnostics.into_iter().collect();

    Ok(serde_json::to_string_pretty(&collected)?)
}

fn extract_progress(line: &str) -> Option<i32> {
    lazy_static! {
        static ref PROGRESS: Regex = Regex::new(r"^\[\s*(\d+)%\]").unwrap();
    }

    PROGRESS
        .captures(line)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

fn is_redirection(line: &str) -> bool {
    lazy_static! {
        static ref REDIRECTION: Regex =
            Regex::new(r"^(make(\[\d+\])?|ninja): Entering directory").unwrap();
    }

    REDIRECTION.is_match(line)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::configuration::{Dialect, ParserSettings};
    use crate::parser::matcher::MockLineMatcher;
    use crate::parser::{
        BuildOutputParser, Diagnostic, LinkSpan, OutputEvent, Severity, StreamOrigin,
    };

    fn gcc_parser() -> BuildOutputParser {
        BuildOutputParser::new(ParserSettings {
            dialect: Dialect::GccClang,
            source_directory: None,
        })
    }

    #[test]
    fn progress_lines_yield_progress_events() {
        let mut sut = gcc_parser();

        assert_eq!(
            Some(OutputEvent::Progress(42)),
            sut.handle_line("[ 42%] Building...", StreamOrigin::Stdout)
        );
        assert_eq!(
            Some(OutputEvent::Progress(100)),
            sut.handle_line("[100%]", StreamOrigin::Stdout)
        );
    }

    #[test]
    fn progress_is_not_clamped_or_assumed_monotonic() {
        let mut sut = gcc_parser();

        assert_eq!(
            Some(OutputEvent::Progress(250)),
            sut.handle_line("[250%] odd", StreamOrigin::Stdout)
        );
        assert_eq!(
            Some(OutputEvent::Progress(50)),
            sut.handle_line("[ 50%] later", StreamOrigin::Stdout)
        );
        assert_eq!(
            Some(OutputEvent::Progress(10)),
            sut.handle_line("[ 10%] earlier", StreamOrigin::Stdout)
        );
    }

    #[test]
    fn unreadable_progress_value_is_no_match() {
        let mut sut = gcc_parser();

        assert_eq!(
            None,
            sut.handle_line("[99999999999999999999%] huge", StreamOrigin::Stdout)
        );
    }

    #[test]
    fn gcc_error_line_yields_a_fatal_diagnostic() {
        let mut sut = gcc_parser();

        let event = sut.handle_line(
            "error: test/main.cpp:12:3: 'a' was not declared in this scope",
            StreamOrigin::Stderr,
        );

        let expected = OutputEvent::Diagnostic {
            diagnostic: Diagnostic {
                file: Some(PathBuf::from("test/main.cpp")),
                line: Some(12),
                column: Some(3),
                severity: Severity::Error,
                message: "'a' was not declared in this scope".to_string(),
                fatal: true,
            },
            links: vec![LinkSpan {
                offset: 7,
                length: 13,
            }],
        };

        assert_eq!(Some(expected), event);
        assert!(sut.has_fatal_errors());
    }

    #[test]
    fn relative_files_resolve_against_the_source_directory() {
        let mut sut = gcc_parser();
        sut.set_source_directory("/src");

        let event = sut.handle_line(
            "warning: lib/util.cpp:4:10: unused variable 'x'",
            StreamOrigin::Stdout,
        );

        match event {
            Some(OutputEvent::Diagnostic { diagnostic, .. }) => {
                assert_eq!(Some(PathBuf::from("/src/lib/util.cpp")), diagnostic.file);
                assert_eq!(Severity::Warning, diagnostic.severity);
                assert!(!diagnostic.fatal);
            }
            other => panic!("expected a diagnostic, got {:?}", other),
        }

        assert!(!sut.has_fatal_errors());
    }

    #[test]
    fn msvc_warning_line_does_not_set_the_fatal_flag() {
        let mut sut = BuildOutputParser::new(ParserSettings {
            dialect: Dialect::Msvc,
            source_directory: None,
        });

        let event = sut.handle_line(
            r"c:\src\a.cpp(10): warning: unused variable",
            StreamOrigin::Stdout,
        );

        match event {
            Some(OutputEvent::Diagnostic { diagnostic, .. }) => {
                assert_eq!(Some(PathBuf::from(r"c:\src\a.cpp")), diagnostic.file);
                assert_eq!(Some(10), diagnostic.line);
                assert_eq!(None, diagnostic.column);
                assert_eq!(Severity::Warning, diagnostic.severity);
            }
            other => panic!("expected a diagnostic, got {:?}", other),
        }

        assert!(!sut.has_fatal_errors());
    }

    #[test]
    fn fatal_flag_stays_set_for_the_rest_of_the_stream() {
        let mut sut = gcc_parser();

        sut.handle_line("error: a.cpp:1:1: boom", StreamOrigin::Stderr);
        sut.handle_line("warning: a.cpp:2:1: harmless", StreamOrigin::Stderr);
        sut.handle_line("[ 90%] almost done", StreamOrigin::Stdout);

        assert!(sut.has_fatal_errors());
    }

    #[test]
    fn redirection_marker_is_sticky() {
        let mut sut = gcc_parser();

        assert!(!sut.has_detected_redirection());

        assert_eq!(
            None,
            sut.handle_line(
                "make[1]: Entering directory '/src/build'",
                StreamOrigin::Stdout
            )
        );
        assert!(sut.has_detected_redirection());

        sut.handle_line("[ 10%] compiling", StreamOrigin::Stdout);
        assert!(sut.has_detected_redirection());
    }

    #[test]
    fn ninja_echo_counts_as_redirection() {
        let mut sut = gcc_parser();

        sut.handle_line("ninja: Entering directory `/src/build'", StreamOrigin::Stdout);

        assert!(sut.has_detected_redirection());
    }

    #[test]
    fn unmatched_lines_yield_no_event() {
        let mut sut = gcc_parser();

        assert_eq!(
            None,
            sut.handle_line("checking for the c++ compiler ... ok", StreamOrigin::Stdout)
        );
        assert_eq!(None, sut.handle_line("", StreamOrigin::Stdout));
        assert!(!sut.has_fatal_errors());
        assert!(!sut.has_detected_redirection());
    }

    #[test]
    fn matcher_is_not_consulted_for_progress_lines() {
        let mut matcher = MockLineMatcher::new();
        matcher.expect_match_line().times(0);

        let mut sut = BuildOutputParser::with_matcher(Box::new(matcher), None);

        sut.handle_line("[ 10%] compiling", StreamOrigin::Stdout);
    }

    #[test]
    fn matcher_is_consulted_once_per_other_line() {
        let mut matcher = MockLineMatcher::new();
        matcher
            .expect_match_line()
            .times(1)
            .returning(|_| None);

        let mut sut = BuildOutputParser::with_matcher(Box::new(matcher), None);

        assert_eq!(None, sut.handle_line("plain line", StreamOrigin::Stdout));
    }

    #[test]
    fn diagnostics_serialize_as_a_problems_list() {
        let diagnostics = vec![Diagnostic {
            file: Some(PathBuf::from("/src/main.cpp")),
            line: Some(12),
            column: Some(3),
            severity: Severity::Error,
            message: "boom".to_string(),
            fatal: true,
        }];

        let json = super::diagnostics_to_json(&diagnostics).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!("error", value[0]["severity"]);
        assert_eq!("/src/main.cpp", value[0]["file"]);
        assert_eq!(12, value[0]["line"]);
        assert_eq!(true, value[0]["fatal"]);
    }
}
