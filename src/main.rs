//! lg - interactive terminal pager for log files.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use loglens::file_handler::{validate_file_path, Document};
use loglens::render::ui::ColorTheme;
use loglens::{process_stream, Application, Config, DisplayOptions};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal};
use std::path::PathBuf;

const KEY_HELP: &str = "\
Keys:
  Ctrl+F, Space, PageDown   next page
  Ctrl+B, b, PageUp         previous page
  j, Down, Enter            next line
  k, Up                     previous line
  g, Home / G, End          first / last line
  :N                        go to line N
  /text                     search (case-insensitive), empty clears
  n / N                     next / previous match
  f, :f, :fN                show the top line (or line N) as JSON
  q, Ctrl+C                 quit";

fn flag(name: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(name)
        .short(short)
        .long(name)
        .help(help)
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("lg")
        .version(loglens::VERSION)
        .about("LogLens (lg) - an interactive terminal pager for log files")
        .long_about(
            "LogLens pages through log files of any size, wrapping long lines, \
             searching case-insensitively and pretty-printing JSON lines. Without \
             a file, or when output is not a terminal, lines are transformed and \
             written straight through.",
        )
        .after_help(KEY_HELP)
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Log file to view"),
        )
        .arg(
            Arg::new("path")
                .value_name("FILE")
                .help("Log file to view (when -f is not given)")
                .index(1),
        )
        .arg(flag("unescape", 'u', "Unescape \\n, \\t, \\r, \\\\, \\\" and \\'"))
        .arg(flag(
            "keep-one-line",
            'k',
            "When unescaping, turn \\n into a space",
        ))
        .arg(flag("trim", 't', "Trim leading and trailing whitespace"))
        .arg(flag("line-number", 'l', "Show line numbers"))
        .arg(flag(
            "interactive",
            'i',
            "Accepted for compatibility; interactive mode is automatic",
        ))
}

fn display_flags(matches: &ArgMatches) -> DisplayOptions {
    DisplayOptions {
        trim_space: matches.get_flag("trim"),
        unescape: matches.get_flag("unescape"),
        keep_one_line: matches.get_flag("keep-one-line"),
        show_line_number: matches.get_flag("line-number"),
    }
}

fn file_arg(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .get_one::<String>("file")
        .or_else(|| matches.get_one::<String>("path"))
        .map(PathBuf::from)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = cli().get_matches();
    let config = Config::load()?;
    let options = config.resolve(display_flags(&matches));
    let theme = ColorTheme::from_name(config.theme);

    let Some(file_path) = file_arg(&matches) else {
        let stdin = io::stdin();
        process_stream(stdin.lock(), BufWriter::new(io::stdout().lock()), &options, &theme)?;
        return Ok(());
    };

    if let Err(err) = validate_file_path(&file_path) {
        anyhow::bail!("{}", err);
    }

    if !io::stdout().is_terminal() {
        let file = File::open(&file_path)?;
        let out = BufWriter::new(io::stdout().lock());
        process_stream(BufReader::new(file), out, &options, &theme)?;
        return Ok(());
    }

    let document = Document::open_async(file_path).await?;
    if document.is_empty() {
        println!("File is empty");
        return Ok(());
    }

    let mut app = Application::new(document, options, theme)?;
    app.run().await?;

    Ok(())
}
