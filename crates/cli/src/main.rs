use anyhow::{Context, Result};
use argmap::{ArgParser, ParserConfig};
use std::io::Write;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt};

/// Flag naming a JSON file with extra aliases/defaults.
const CONFIG_FLAG: &str = "config";
/// Print the parser state as JSON instead of the report.
const DUMP_FLAG: &str = "dump";

fn main() -> Result<()> {
    init_tracing();
    let parser = ArgParser::from_env();
    let stdout = std::io::stdout();
    run(parser, &mut stdout.lock())
}

fn builtin_config() -> ParserConfig {
    ParserConfig::new()
        .alias("v", "verbose")
        .alias("f", "file")
        .alias("d", "debug")
        .default_value("verbose", "false")
        .default_value("debug", "false")
        .default_value("file", "input.txt")
        .default_value("n", "10")
}

fn load_config(parser: &ArgParser) -> Result<ParserConfig> {
    let mut config = builtin_config();
    if parser.has_flag(CONFIG_FLAG) {
        let path = Path::new(parser.get_flag_value(CONFIG_FLAG));
        tracing::debug!(path = %path.display(), "loading parser config");
        config.merge(ParserConfig::from_file(path)?);
    }
    Ok(config)
}

fn run(mut parser: ArgParser, out: &mut impl Write) -> Result<()> {
    let config = load_config(&parser)?;
    config.apply(&mut parser);

    if parser.get_bool_flag(DUMP_FLAG) {
        let json = serde_json::to_string_pretty(&parser)?;
        writeln!(out, "{json}").context("failed to write to stdout")?;
        return Ok(());
    }

    report(&parser, out).context("failed to write to stdout")?;
    Ok(())
}

fn report(parser: &ArgParser, out: &mut impl Write) -> std::io::Result<()> {
    if parser.get_bool_flag("v") {
        writeln!(out, "Verbose mode is ON")?;
    }

    if parser.has_flag("file") {
        writeln!(out, "File: {}", parser.get_flag_value("f"))?;
    }

    if parser.has_flag("n") {
        writeln!(out, "Number: {}", parser.get_flag_value("n"))?;
    }

    if parser.get_bool_flag("debug") {
        writeln!(out, "Debug mode is ON")?;
    } else {
        writeln!(out, "Debug mode is OFF")?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
