mod debug_report;

use rejoinder::{Conversation, Options, Reply, Script};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REJOINDER_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    let script = match &config.script {
        Some(path) => Script::load(path),
        None => Script::bundled(),
    };
    let script = match script {
        Ok(script) => script,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let options = Options { seed: config.seed, dedupe_triggers: config.dedupe_triggers };
    let mut conversation = Conversation::with_options(&script, options);

    let result = match &config.message {
        Some(message) => respond(&mut conversation, message, &config).map(|_| ()),
        None => chat(&mut conversation, &config),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    script: Option<PathBuf>,
    seed: Option<u64>,
    dedupe_triggers: bool,
    message: Option<String>,
    trace: bool,
    color: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Read lines until an exit word or end of input.
fn chat(conversation: &mut Conversation<'_>, config: &CliConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Some(greeting) = conversation.greeting() {
        writeln!(stdout, "{greeting}")?;
    }

    let mut line = String::new();
    loop {
        write!(stdout, "You: ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }
        let message = line.trim_end_matches(['\r', '\n']);
        if !respond(conversation, message, config)? {
            break;
        }
    }

    if let Some(farewell) = conversation.farewell() {
        writeln!(stdout, "{farewell}")?;
    }
    Ok(())
}

/// Answer one message. Returns `false` once the conversation is over.
fn respond(conversation: &mut Conversation<'_>, message: &str, config: &CliConfig) -> io::Result<bool> {
    let reply = if config.trace {
        let verbose = conversation.reply_verbose(message);
        debug_report::print_turn(message, &verbose.details, config.color);
        verbose.reply
    } else {
        conversation.reply(message)
    };

    match reply {
        Reply::Text(text) => {
            writeln!(io::stdout(), "Bot: {text}")?;
            Ok(true)
        }
        Reply::Exit => Ok(false),
    }
}

fn parse_args() -> Result<CliConfig, String> {
    let mut script: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut dedupe_triggers = false;
    let mut message: Option<String> = None;
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("rejoinder {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--trace" => trace = true,
            "--dedupe-triggers" => dedupe_triggers = true,
            "--script" | "-s" => {
                let value = args.next().ok_or_else(|| "error: --script expects a path".to_string())?;
                script = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                seed = Some(parse_seed(&value)?);
            }
            "--message" | "-m" => {
                let value = args.next().ok_or_else(|| "error: --message expects a value".to_string())?;
                set_message(&mut message, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    set_message(&mut message, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--script=") => {
                script = Some(PathBuf::from(arg.trim_start_matches("--script=")));
            }
            _ if arg.starts_with("--seed=") => {
                seed = Some(parse_seed(arg.trim_start_matches("--seed="))?);
            }
            _ if arg.starts_with("--message=") => {
                set_message(&mut message, arg.trim_start_matches("--message=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_message(&mut message, rest)?;
                break;
            }
        }
    }

    Ok(CliConfig { script, seed, dedupe_triggers, message, trace, color })
}

fn set_message(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: message provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid --seed '{value}' (expected an unsigned integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "rejoinder {version}

Rule-driven conversational response engine.

Usage:
  rejoinder [OPTIONS]                     chat interactively
  rejoinder [OPTIONS] [--] <message...>   answer one message and exit
  rejoinder [OPTIONS] --message <text>

Options:
  -s, --script <path>   Rule file to load. Default: the bundled script.
  --seed <n>            Seed memory draws and greeting/farewell choice.
  --dedupe-triggers     Try a trigger once per message even if its keyword
                        occurs several times.
  --trace               Print tokens, triggers and pattern attempts for
                        every message.
  --color               Force ANSI color output.
  --no-color            Disable ANSI color output.
  -h, --help            Show this help message.
  -V, --version         Print version information.

Environment:
  {log_env}         tracing filter, e.g. rejoinder=debug (default: warn).

Exit codes:
  0  Success.
  1  Script could not be loaded, or I/O failed.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV
    )
}
