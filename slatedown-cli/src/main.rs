// Command-line interface for slatedown
//
// This binary provides commands for converting and inspecting editor
// documents.
//
// The main role for the slatedown program is to move content between the
// editor's JSON document tree and Markdown. The core capabilities use the
// slatedown crate, which is a collection of formats and the enrichment
// pipeline behind the Markdown import.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected
// from the file extension, while being overwrittable by an explicit --from
// flag.
// Usage:
//  slatedown <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  slatedown convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  slatedown inspect <path> [<transform>]      - Execute a transform (defaults to "tree-json")
//  slatedown --list-transforms                 - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  slatedown notes.md --to json --extra-pretty false

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use slatedown::formats::json::JsonFormat;
use slatedown::formats::markdown::MarkdownFormat;
use slatedown::FormatRegistry;
use slatedown_config::{Loader, SlatedownConfig};
use std::collections::HashMap;
use std::fs;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            // Check if the next arg is a value or another flag/end
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                // No value, treat as boolean flag
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("slatedown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting editor documents")
        .long_about(
            "slatedown is a command-line tool for working with editor document trees.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (markdown, json)\n  \
            - inspect: View the document tree at different pipeline stages\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            slatedown notes.md --to json            # Import to the tree (stdout)\n  \
            slatedown tree.json --to markdown       # Export to Markdown\n  \
            slatedown inspect notes.md tree-raw-json # Tree before enrichment",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a slatedown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the document tree behind a Markdown file")
                .long_about(
                    "View the document tree at different stages of the import pipeline.\n\n\
                    Transforms:\n  \
                    - tree-json:     Enriched tree as JSON (default)\n  \
                    - tree-raw-json: Tree before the enrichment pass\n  \
                    - markdown:      Normalized Markdown round-trip\n\n\
                    Diff tree-raw-json against tree-json to see what the enrichment\n\
                    pass recovered (checkbox state, table alignment, reference links).\n\n\
                    Examples:\n  \
                    slatedown inspect notes.md                 # Enriched tree (default)\n  \
                    slatedown inspect notes.md tree-raw-json   # Pre-enrichment tree\n  \
                    slatedown inspect notes.md markdown        # Normalized Markdown",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'tree-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown text (.md, .markdown)\n  \
                    - json:     Editor document tree as JSON (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    slatedown convert notes.md --to json         # Import (stdout)\n  \
                    slatedown convert tree.json --to markdown    # Export\n  \
                    slatedown notes.md --to json -o tree.json    # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: markdown, json\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // Check if this is a "missing subcommand" error by seeing if
            // the first arg looks like a file
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                // Inject "convert" as the subcommand
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config);

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(&config.inspect.default_transform);
            handle_inspect_command(path, transform);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from_arg = sub_matches.get_one::<String>("from");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            // Auto-detect --from if not provided
            let from = if let Some(f) = from_arg {
                f.to_string()
            } else {
                let registry = build_registry(&config);
                match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let output = transforms::execute_transform(&source, transform).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    println!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &SlatedownConfig,
) {
    let registry = build_registry(config);

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    // Read input file
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    // Parse
    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Serialize (format-specific parameters allowed via --extra-*)
    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    // Output
    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            println!("{result}");
        }
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command(config: &SlatedownConfig) {
    println!("Available transforms:\n");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = build_registry(config);
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

/// Build the format registry, applying configured format defaults.
fn build_registry(config: &SlatedownConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat {
        enrich: config.convert.enrich,
    });
    registry.register(JsonFormat {
        pretty: config.convert.json.pretty,
    });
    registry
}

fn load_cli_config(explicit_path: Option<&str>) -> SlatedownConfig {
    let loader = Loader::new().with_optional_file("slatedown.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut SlatedownConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("enrich") {
        config.convert.enrich = parse_bool_arg("enrich", &raw);
    }
    if let Some(raw) = extra_params.remove("log") {
        config.logging.filter = raw;
    }
}

fn parse_bool_arg(name: &str, raw: &str) -> bool {
    match raw {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        other => {
            eprintln!("Invalid boolean for --extra-{name}: '{other}'");
            std::process::exit(1);
        }
    }
}

fn init_logging(config: &SlatedownConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
