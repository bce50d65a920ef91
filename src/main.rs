//! Wegram wallet — identity bootstrap entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Bootstrap the wallet identity (load or generate + persist)
//!   6. Run the requested command

use tracing::{info, warn};

use wegram_wallet::bootstrap::identity::{self, ActiveWallet};
use wegram_wallet::bootstrap::logger;
use wegram_wallet::config;
use wegram_wallet::error::AppError;
use wegram_wallet::wallet::keygen::SECRET_KEY_FIELD;
use wegram_wallet::wallet::{Osc52Clipboard, copy_address, public_key_from_secret};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Optional file.
    let _ = dotenvy::dotenv();

    let args = match parse_cli_args(std::env::args().skip(1))? {
        CliAction::Help => {
            print_help();
            return Ok(());
        }
        CliAction::Run(args) => args,
    };

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(
        effective_log_level,
        args.log_level.is_some(),
        config.log_file.as_deref(),
    )?;

    info!(
        app = %config.app_name,
        work_dir = %config.work_dir.display(),
        slot = %config.wallet.slot,
        storage_failure = %config.wallet.storage_failure,
        log_level = %effective_log_level,
        "config loaded"
    );

    let wallet = identity::setup(&config)?;
    info!(
        public_key = %wallet.identity.public_key,
        persisted = wallet.persisted,
        path = %wallet.slot_path.display(),
        "wallet identity ready"
    );
    if !wallet.persisted {
        eprintln!("warning: wallet storage unavailable; this identity will not survive a restart");
    }

    match args.command {
        Command::Address => println!("{}", wallet.identity.public_key),
        Command::Show => show(&wallet)?,
        Command::Verify => verify(&wallet)?,
    }

    if args.copy {
        let mut clipboard = Osc52Clipboard::stdout();
        if let Err(e) = copy_address(&wallet.identity, &mut clipboard) {
            eprintln!("could not copy address: {e}");
        } else {
            eprintln!("Address copied to clipboard!");
        }
    }

    Ok(())
}

fn show(wallet: &ActiveWallet) -> Result<(), AppError> {
    let shown = serde_json::to_string_pretty(&wallet.identity.redacted())?;
    println!("{shown}");
    println!("slot: {}", wallet.slot_path.display());
    Ok(())
}

fn verify(wallet: &ActiveWallet) -> Result<(), AppError> {
    let Some(secret) = wallet
        .identity
        .field(SECRET_KEY_FIELD)
        .and_then(|v| v.as_str())
    else {
        warn!("stored identity carries no {SECRET_KEY_FIELD}; nothing to verify");
        println!("no {SECRET_KEY_FIELD} stored; public key cannot be verified");
        return Ok(());
    };

    let derived = public_key_from_secret(secret)?;
    if derived == wallet.identity.public_key {
        println!("ok: {SECRET_KEY_FIELD} matches publicKey {}", wallet.identity.public_key);
        Ok(())
    } else {
        Err(AppError::Identity(format!(
            "publicKey {} does not match the key derived from {SECRET_KEY_FIELD} ({derived})",
            wallet.identity.public_key
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Address,
    Show,
    Verify,
}

#[derive(Debug, PartialEq, Eq)]
enum CliAction {
    Help,
    Run(CliArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    command: Command,
    copy: bool,
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn print_help() {
    println!("Usage: wegram-wallet [OPTIONS] [COMMAND]");
    println!();
    println!("Commands:");
    println!("  address                    Print the wallet address (default)");
    println!("  show                       Print the stored identity with secrets redacted");
    println!("  verify                     Check that secretKey derives publicKey");
    println!();
    println!("Options:");
    println!("  -h, --help                 Print help");
    println!("  -c, --copy                 Copy the address to the clipboard (OSC 52)");
    println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
    println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
}

/// Parse arguments (program name already stripped).
fn parse_cli_args<I>(args: I) -> Result<CliAction, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut verbosity = 0u8;
    let mut copy = false;
    let mut config_path = None;
    let mut command = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-c" | "--copy" => copy = true,
            "-f" | "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => return Err(AppError::Config("-f/--config requires a path argument".into())),
            },
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            "address" | "show" | "verify" if command.is_none() => {
                command = Some(match arg.as_str() {
                    "show" => Command::Show,
                    "verify" => Command::Verify,
                    _ => Command::Address,
                });
            }
            other => {
                return Err(AppError::Config(format!(
                    "unexpected argument '{other}' (see --help)"
                )));
            }
        }
    }

    Ok(CliAction::Run(CliArgs {
        command: command.unwrap_or(Command::Address),
        copy,
        log_level: logger::level_for_verbosity(verbosity),
        config_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliAction, AppError> {
        parse_cli_args(args.iter().map(|a| a.to_string()))
    }

    fn run_args(args: &[&str]) -> CliArgs {
        match parse(args).unwrap() {
            CliAction::Run(parsed) => parsed,
            CliAction::Help => panic!("expected run arguments for {args:?}"),
        }
    }

    #[test]
    fn no_arguments_prints_the_address() {
        let parsed = run_args(&[]);
        assert_eq!(parsed.command, Command::Address);
        assert!(!parsed.copy);
        assert_eq!(parsed.log_level, None);
        assert_eq!(parsed.config_path, None);
    }

    #[test]
    fn verbosity_flags_accumulate() {
        assert_eq!(run_args(&["-v"]).log_level, Some("warn"));
        assert_eq!(run_args(&["-vvv"]).log_level, Some("debug"));
        assert_eq!(run_args(&["-v", "-vv"]).log_level, Some("debug"));
        assert_eq!(run_args(&["--verbose", "-vvvv"]).log_level, Some("trace"));
    }

    #[test]
    fn commands_and_options_combine() {
        let parsed = run_args(&["show", "-c", "-f", "/etc/wegram.toml"]);
        assert_eq!(parsed.command, Command::Show);
        assert!(parsed.copy);
        assert_eq!(parsed.config_path.as_deref(), Some("/etc/wegram.toml"));
        assert_eq!(run_args(&["--copy", "verify"]).command, Command::Verify);
    }

    #[test]
    fn second_command_is_rejected() {
        let err = parse(&["address", "show"]).unwrap_err();
        assert!(err.to_string().contains("unexpected argument 'show'"));
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        assert!(err.to_string().contains("unexpected argument '--frobnicate'"));
    }

    #[test]
    fn config_flag_requires_a_path() {
        let err = parse(&["-f"]).unwrap_err();
        assert!(err.to_string().contains("-f/--config requires a path argument"));
    }

    #[test]
    fn help_wins_and_stops_parsing() {
        assert_eq!(parse(&["-h", "--bogus"]).unwrap(), CliAction::Help);
        assert_eq!(parse(&["show", "--help"]).unwrap(), CliAction::Help);
    }

    #[test]
    fn double_dash_ends_option_parsing() {
        let parsed = run_args(&["verify", "--", "-vvv", "whatever"]);
        assert_eq!(parsed.command, Command::Verify);
        assert_eq!(parsed.log_level, None);
    }
}
