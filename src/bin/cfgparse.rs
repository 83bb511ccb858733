//! Command-line interface for cfgparse
//! Reads a rules file, parses one or more inputs against it and prints a verdict and a rendered
//! derivation tree for each.
//!
//! Usage:
//!   cfgparse `<grammar>` `<input>`...          - Parse each input argument
//!   cfgparse `<grammar>` < inputs.txt          - Parse each non-empty stdin line
//!   cfgparse --list-formats                   - List the available tree formats
//!
//! Exit status: 0 when every input is valid, 1 when at least one is not, 2 on errors.

use cfgparse::cfg::analysis::analyze;
use cfgparse::cfg::config::{CfgParseConfig, Loader};
use cfgparse::cfg::formats::FormatRegistry;
use cfgparse::cfg::{CompiledGrammar, Grammar, ParseOptions, ParseOutcome, Verdict};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, BufRead};
use std::process;

const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let matches = Command::new("cfgparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recognize token sequences against a context-free grammar and print derivations")
        .arg_required_else_help(true)
        .arg(
            Arg::new("grammar")
                .help("Path to the rules file (one 'HEAD -> ALT | ALT' rule per line)")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("input")
                .help("Inputs to parse (whitespace-separated tokens); read from stdin when absent")
                .num_args(0..)
                .index(2),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Tree output format (default from configuration: treeviz)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_parser(clap::value_parser!(usize))
                .help("Fail inputs whose matching recurses deeper than this (0 = unlimited)"),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print match statistics to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available tree formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let registry = FormatRegistry::with_defaults();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: invalid configuration: {}", e);
        process::exit(EXIT_ERROR);
    });

    if !registry.has(&config.output.format) {
        eprintln!("Error: unknown format '{}'", config.output.format);
        eprintln!("\nAvailable formats:");
        for name in registry.list_formats() {
            eprintln!("  {}", name);
        }
        process::exit(EXIT_ERROR);
    }

    let Some(path) = matches.get_one::<String>("grammar") else {
        eprintln!("Error: a grammar file is required");
        process::exit(EXIT_ERROR);
    };
    let grammar = load_grammar(path);

    let inputs: Vec<String> = match matches.get_many::<String>("input") {
        Some(values) => values.cloned().collect(),
        None => read_stdin_inputs(),
    };

    let all_valid = handle_parse_command(&grammar, &inputs, &config, &registry);
    if !all_valid {
        process::exit(EXIT_INVALID);
    }
}

/// Defaults, then the optional user file, then command line flags
fn load_config(matches: &ArgMatches) -> Result<CfgParseConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(&depth) = matches.get_one::<usize>("max-depth") {
        let depth = i64::try_from(depth).map_err(|_| {
            config::ConfigError::Message(format!("--max-depth {depth} is out of range"))
        })?;
        loader = loader.set_override("parser.max_depth", depth)?;
    }
    if matches.get_flag("stats") {
        loader = loader.set_override("output.show_stats", true)?;
    }
    loader.build()
}

/// Read, parse and compile the rules file, printing lint warnings to stderr
fn load_grammar(path: &str) -> CompiledGrammar {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading grammar file: {}", e);
        process::exit(EXIT_ERROR);
    });

    let grammar = Grammar::from_rules(&source).unwrap_or_else(|e| {
        eprintln!("Error: {}:{}", path, e);
        process::exit(EXIT_ERROR);
    });
    if grammar.is_empty() {
        eprintln!("warning: {} defines no rules; every input will be rejected", path);
    }

    let compiled = grammar.compile();
    for warning in analyze(&compiled).warnings() {
        eprintln!("warning: {}", warning);
    }
    compiled
}

fn read_stdin_inputs() -> Vec<String> {
    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.unwrap_or_else(|e| {
            eprintln!("Error reading input: {}", e);
            process::exit(EXIT_ERROR);
        });
        if !line.trim().is_empty() {
            inputs.push(line);
        }
    }
    inputs
}

/// Parse every input and report. Returns whether all of them were valid.
fn handle_parse_command(
    grammar: &CompiledGrammar,
    inputs: &[String],
    config: &CfgParseConfig,
    registry: &FormatRegistry,
) -> bool {
    let options: ParseOptions = config.parser.parse_options();
    let mut all_valid = true;

    for input in inputs {
        let outcome = grammar.parse_with(input, &options);
        println!("{}", describe_outcome(input, &outcome));

        if let Some(tree) = outcome.tree() {
            let rendered = registry
                .serialize(tree, &config.output.format)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(EXIT_ERROR);
                });
            print!("{}", rendered);
        }

        if config.output.show_stats {
            eprintln!("stats: {}", outcome.stats());
        }
        all_valid &= outcome.is_valid();
    }

    all_valid
}

fn describe_outcome(input: &str, outcome: &ParseOutcome) -> String {
    let input = input.trim();
    match outcome.verdict() {
        Verdict::Accepted => format!("valid: {}", input),
        Verdict::DepthExceeded { limit } => {
            format!("invalid: {} (recursion depth limit {} exceeded)", input, limit)
        }
        Verdict::Rejected => match outcome.consumed() {
            Some(consumed) if outcome.is_partial() => format!(
                "invalid: {} (matched {} of {} tokens)",
                input,
                consumed,
                outcome.token_count()
            ),
            _ => format!("invalid: {}", input),
        },
    }
}

fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");

    for formatter in registry.formats() {
        println!("  {}", formatter.name());
        println!("    {}", formatter.description());
        println!();
    }
}
