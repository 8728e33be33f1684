use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{App, Arg, ArgMatches, SubCommand};
use log::debug;

use projmodel::configuration::{Dialect, ParserSettings, ProjectSettings};
use projmodel::introspection;
use projmodel::parser::{diagnostics_to_json, BuildOutputParser, OutputEvent, StreamOrigin};
use projmodel::tree::TreeBuilder;

mod render;

fn main() -> Result<(), Box<dyn Error>> {
    let matches = App::new("xmakemap")
        .version("0.1.0")
        .about("Turns xmake introspection data into IDE-ready project models")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Increases log verbosity"),
        )
        .subcommand(
            SubCommand::with_name("tree")
                .about("Builds and prints the project tree from introspection JSON")
                .arg(
                    Arg::with_name("introspection")
                        .required(true)
                        .help("Path to the introspection JSON file"),
                )
                .arg(
                    Arg::with_name("source-dir")
                        .long("source-dir")
                        .takes_value(true)
                        .help("Directory holding the top-level build descriptor"),
                )
                .arg(
                    Arg::with_name("project-dir")
                        .long("project-dir")
                        .takes_value(true)
                        .help("Directory relative descriptor paths resolve against"),
                ),
        )
        .subcommand(
            SubCommand::with_name("parse")
                .about("Parses build output from stdin into diagnostics")
                .arg(
                    Arg::with_name("dialect")
                        .long("dialect")
                        .takes_value(true)
                        .possible_values(&["gcc", "msvc"])
                        .default_value("gcc")
                        .help("Build-output line format"),
                )
                .arg(
                    Arg::with_name("source-dir")
                        .long("source-dir")
                        .takes_value(true)
                        .help("Directory relative diagnostic paths resolve against"),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Prints collected diagnostics as a JSON problems list"),
                ),
        )
        .get_matches();

    stderrlog::new()
        .verbosity(matches.occurrences_of("verbosity") as usize)
        .init()?;

    match matches.subcommand() {
        ("tree", Some(arguments)) => run_tree(arguments),
        ("parse", Some(arguments)) => run_parse(arguments),
        _ => Err("No subcommand given. Try --help.".into()),
    }
}

fn run_tree(arguments: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input = std::fs::read_to_string(arguments.value_of("introspection").unwrap())?;
    let introspection = introspection::from_json(&input)?;

    let current = std::env::current_dir()?;

    let source_dir = match arguments.value_of("source-dir") {
        Some(directory) => util::absolutize(directory, &current),
        None => current.clone(),
    };

    let project_dir = match arguments.value_of("project-dir") {
        Some(directory) => util::absolutize(directory, &current),
        None if introspection.project_dir.as_os_str().is_empty() => source_dir.clone(),
        None => util::absolutize(&introspection.project_dir, &source_dir),
    };

    debug!(
        "building tree for {} target(s) under {}",
        introspection.targets.len(),
        source_dir.display()
    );

    let builder = TreeBuilder::new(ProjectSettings {
        source_directory: source_dir,
        project_directory: project_dir,
    });
    let tree = builder.build(&introspection.targets, &introspection.build_system_files);

    print!("{}", render::render(&tree));

    Ok(())
}

fn run_parse(arguments: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let dialect = match arguments.value_of("dialect") {
        Some("msvc") => Dialect::Msvc,
        _ => Dialect::GccClang,
    };

    let settings = ParserSettings {
        dialect,
        source_directory: arguments.value_of("source-dir").map(PathBuf::from),
    };

    let mut parser = BuildOutputParser::new(settings);
    let mut diagnostics = vec![];

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;

        match parser.handle_line(&line, StreamOrigin::Stdout) {
            Some(OutputEvent::Progress(progress)) => eprintln!("[{:3}%]", progress),
            Some(OutputEvent::Diagnostic { diagnostic, .. }) => {
                println!("{}", render::render_diagnostic(&diagnostic));
                diagnostics.push(diagnostic);
            }
            None => {}
        }
    }

    if arguments.is_present("json") {
        println!("{}", diagnostics_to_json(&diagnostics)?);
    }

    if parser.has_detected_redirection() {
        debug!("the build tool echoed another driver's output");
    }

    if parser.has_fatal_errors() {
        return Err("build output contained fatal errors".into());
    }

    Ok(())
}
