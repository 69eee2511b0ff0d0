//! MDN CLI - Parse, validate and format MDN markup documents
//!
//! Usage:
//!   mdncli [OPTIONS] [COMMAND] <FILE>
//!
//! Commands:
//!   parse     Parse and display document structure (default)
//!   validate  Check a document for errors
//!   fmt       Re-emit the document in canonical form
//!   stats     Show document statistics

use std::env;
use std::fs;
use std::process;

use mdn_core::{Document, Element, Error, Param};
use serde::Serialize;

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    let input = fs::read_to_string(&config.file)
        .map_err(|e| format!("failed to read '{}': {}", config.file, e))?;

    match config.command {
        Command::Parse => cmd_parse(&input, &config),
        Command::Validate => cmd_validate(&input, &config),
        Command::Fmt => cmd_fmt(&input),
        Command::Stats => cmd_stats(&input, &config.file),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    verbose: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Parse,
    Validate,
    Fmt,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Parse;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut file = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("mdncli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "parse" => command = Command::Parse,
            "validate" => command = Command::Validate,
            "fmt" => command = Command::Fmt,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        verbose,
    })
}

fn print_help() {
    eprintln!(
        r#"mdncli - MDN markup parser and formatter

USAGE:
    mdncli [OPTIONS] [COMMAND] <FILE>

COMMANDS:
    parse       Parse and display document structure (default)
    validate    Check a document for errors without output
    fmt         Re-emit the document in canonical form
    stats       Show document statistics

OPTIONS:
    -v, --verbose    Show the full element tree
    -j, --json       Output in JSON format
    -h, --help       Print help information
    -V, --version    Print version information

EXAMPLES:
    mdncli ui.mdn              Parse an MDN file
    mdncli -v ui.mdn           Parse with full tree output
    mdncli -j ui.mdn           Output the tree as JSON
    mdncli validate ui.mdn     Validate without output
    mdncli fmt ui.mdn          Print the canonical rendering
    mdncli stats ui.mdn        Show document statistics
"#
    );
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(input: &str, config: &Config) -> Result<(), String> {
    let doc = mdn_core::parse(input).map_err(|e| e.to_string())?;

    match config.format {
        OutputFormat::Json => print_json(&doc),
        OutputFormat::Text => {
            if config.verbose {
                print_document_verbose(&doc);
            } else {
                print_document_summary(&doc);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(input: &str, config: &Config) -> Result<(), String> {
    match mdn_core::parse(input) {
        Ok(_) => {
            if matches!(config.format, OutputFormat::Json) {
                println!(r#"{{"valid": true}}"#);
            } else {
                println!("Valid: no errors found");
            }
            Ok(())
        }
        Err(error) => {
            if matches!(config.format, OutputFormat::Json) {
                let (stage, message, line, column) = match &error {
                    Error::Lex(e) => ("lex", e.message.as_str(), e.line, e.column),
                    Error::Parse(e) => ("parse", e.message.as_str(), e.line, e.column),
                };
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "error": {
                            "stage": stage,
                            "message": message,
                            "line": line,
                            "column": column,
                        }
                    })
                );
            } else {
                eprintln!("Invalid: {}", error);
            }
            Err(error.to_string())
        }
    }
}

// =============================================================================
// Fmt Command
// =============================================================================

fn cmd_fmt(input: &str) -> Result<(), String> {
    let doc = mdn_core::parse(input).map_err(|e| e.to_string())?;
    println!("{}", mdn_core::format(&doc));
    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &str, file: &str) -> Result<(), String> {
    let doc = mdn_core::parse(input).map_err(|e| e.to_string())?;
    let stats = DocumentStats::from_document(&doc, input);

    println!("Document Statistics");
    println!("-------------------");
    println!("File:           {}", file);
    println!();
    println!("Content:");
    println!("  Elements:       {}", stats.elements);
    println!("  Parameters:     {}", stats.params);
    println!("  Values:         {}", stats.values);
    println!("  Max depth:      {}", stats.max_depth);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

struct DocumentStats {
    elements: usize,
    params: usize,
    values: usize,
    max_depth: usize,
    chars: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            elements: 0,
            params: 0,
            values: 0,
            max_depth: 0,
            chars: input.chars().count(),
            lines: input.lines().count(),
        };

        for element in doc.elements() {
            stats.count_element(element, 1);
        }
        stats
    }

    fn count_element(&mut self, element: &Element, depth: usize) {
        self.elements += 1;
        self.max_depth = self.max_depth.max(depth);
        for param in element.params() {
            self.params += 1;
            self.values += param.len();
        }
        for child in element.children() {
            self.count_element(child, depth + 1);
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    elements: Vec<JsonElement<'a>>,
}

#[derive(Serialize)]
struct JsonElement<'a> {
    name: &'a str,
    params: Vec<JsonParam<'a>>,
    children: Vec<JsonElement<'a>>,
}

#[derive(Serialize)]
struct JsonParam<'a> {
    name: &'a str,
    values: &'a [String],
}

fn print_json(doc: &Document) {
    let json_doc = JsonDocument {
        elements: doc.elements().iter().map(convert_element).collect(),
    };
    match serde_json::to_string_pretty(&json_doc) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("error: failed to serialize document: {}", e),
    }
}

fn convert_element(element: &Element) -> JsonElement<'_> {
    JsonElement {
        name: element.name(),
        params: element.params().iter().map(convert_param).collect(),
        children: element.children().iter().map(convert_element).collect(),
    }
}

fn convert_param(param: &Param) -> JsonParam<'_> {
    JsonParam {
        name: param.name(),
        values: param.values(),
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Elements: {}", doc.elements().len());
    for (i, element) in doc.elements().iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_element(element));
    }
}

fn print_document_verbose(doc: &Document) {
    for element in doc.elements() {
        print_element_verbose(element, 0);
    }
}

fn describe_element(element: &Element) -> String {
    format!(
        "{} ({} params, {} children)",
        element.name(),
        element.params().len(),
        element.children().len()
    )
}

fn print_element_verbose(element: &Element, indent: usize) {
    let prefix = "  ".repeat(indent);

    println!("{}{}", prefix, element.name());
    for param in element.params() {
        println!("{}  {}", prefix, param);
    }
    for child in element.children() {
        print_element_verbose(child, indent + 1);
    }
}
