//! pxvw - convert px lengths in a stylesheet to viewport units
//!
//! Usage: pxvw [OPTIONS] <INPUT>

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use pxvw_convert::{BlacklistEntry, Config, ConvertOptions, Processor};
use pxvw_css::Stylesheet;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pxvw");

    let command = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run '{} --help' for usage.", program);
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("pxvw {}", VERSION);
            ExitCode::SUCCESS
        }
        Command::Convert(cli) => {
            if let Err(e) = run(cli) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"pxvw {} - convert px lengths to viewport units

USAGE:
    {} [OPTIONS] <INPUT>

    INPUT is a CSS file, or '-' to read from stdin.

OPTIONS:
    -h, --help                    Print this help message
    -V, --version                 Print version information
    -o, --output <FILE>           Write the result to FILE instead of stdout
    --config <FILE>               Read options from a JSON file
    --viewport-width <N>          Viewport width in px (default 320)
    --unit-precision <N>          Fractional digits to keep (default 5)
    --viewport-unit <UNIT>        Unit to convert to (default vw)
    --min-pixel-value <N>         Leave values at or below N px alone (default 1)
    --prop <ENTRY>                Property list entry, repeatable (e.g. '*', '!font*')
    --blacklist <TEXT>            Skip selectors containing TEXT, repeatable
    --blacklist-pattern <REGEX>   Skip selectors matching REGEX, repeatable
    --media-query                 Also convert @media params
    --no-fallback                 Do not keep the original px declaration

EXAMPLES:
    {} --prop '*' styles.css
    {} --config pxvw.json -o out.css styles.css
    cat styles.css | {} --viewport-width 375 --prop '*' -

"#,
        VERSION, program, program, program, program
    );
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Convert(Cli),
}

/// Options for a conversion run
#[derive(Debug, Default, PartialEq)]
struct Cli {
    input: String,
    output: Option<String>,
    config_path: Option<String>,
    overrides: ConvertOptions,
    keep_original: bool,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut cli = Cli { keep_original: true, ..Cli::default() };
    let mut input = None;
    let mut props: Vec<String> = Vec::new();
    let mut blacklist: Vec<BlacklistEntry> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", name))
        };

        match arg {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--output" | "-o" => cli.output = Some(value(arg)?),
            "--config" => cli.config_path = Some(value(arg)?),
            "--viewport-width" => cli.overrides.viewport_width = Some(parse_number(arg, &value(arg)?)?),
            "--unit-precision" => cli.overrides.unit_precision = Some(parse_number(arg, &value(arg)?)?),
            "--viewport-unit" => cli.overrides.viewport_unit = Some(value(arg)?),
            "--min-pixel-value" => cli.overrides.min_pixel_value = Some(parse_number(arg, &value(arg)?)?),
            "--prop" => props.push(value(arg)?),
            "--blacklist" => blacklist.push(BlacklistEntry::Literal(value(arg)?)),
            "--blacklist-pattern" => blacklist.push(BlacklistEntry::Pattern { pattern: value(arg)? }),
            "--media-query" => cli.overrides.media_query = Some(true),
            "--no-fallback" => cli.keep_original = false,
            "-" => input = Some(arg.to_string()),
            flag if flag.starts_with('-') => return Err(format!("Unknown option '{}'", flag)),
            path => {
                if input.is_some() {
                    return Err(format!("Unexpected argument '{}'", path));
                }
                input = Some(path.to_string());
            }
        }
    }

    cli.input = input.ok_or("Missing INPUT")?;
    if !props.is_empty() {
        cli.overrides.prop_list = Some(props);
    }
    if !blacklist.is_empty() {
        cli.overrides.selector_blacklist = Some(blacklist);
    }

    Ok(Command::Convert(cli))
}

fn parse_number<T: std::str::FromStr>(name: &str, text: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("Invalid value '{}' for {}", text, name))
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = match &cli.config_path {
        Some(path) => ConvertOptions::from_path(path)
            .map_err(|e| format!("Failed to load {}: {}", path, e))?,
        None => ConvertOptions::default(),
    };
    let config = Config::from_options(options.merge(cli.overrides))?;

    let css = if cli.input == "-" {
        let mut css = String::new();
        io::stdin().read_to_string(&mut css)?;
        css
    } else {
        fs::read_to_string(&cli.input)
            .map_err(|e| format!("Failed to read {}: {}", cli.input, e))?
    };

    let mut stylesheet = Stylesheet::parse(&css)?;
    let stats = Processor::new(&config)
        .keep_original(cli.keep_original)
        .process(&mut stylesheet);
    log::info!(
        "{}: {} declarations, {} at-rules converted",
        cli.input,
        stats.declarations,
        stats.at_rules
    );

    let output = stylesheet.to_string();
    match &cli.output {
        Some(path) => fs::write(path, output).map_err(|e| format!("Failed to write {}: {}", path, e))?,
        None => print!("{}", output),
    }

    Ok(())
}
