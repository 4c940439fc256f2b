//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::Overrides;

/// Split a shared grocery cart between roommates, tax included
#[derive(Parser, Debug)]
#[command(name = "cartsplit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: ./cartsplit.toml when present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split the cart and write each roommate's share
    Split(SplitArgs),

    /// Validate the cart without splitting it
    Check(CheckArgs),
}

/// Arguments for `cartsplit split`
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Snapshot file holding the cart and roommates
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Where to write the split snapshot
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Where to write an error report if the split fails
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub error_output: Option<PathBuf>,

    /// Do not print roommates and cart to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Relative tolerance for total checks
    #[arg(long)]
    pub epsilon: Option<f64>,
}

/// Arguments for `cartsplit check`
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Snapshot file holding the cart and roommates
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Relative tolerance for total checks
    #[arg(long)]
    pub epsilon: Option<f64>,
}

impl Cli {
    /// Error report destination given on the command line, if any.
    ///
    /// Used when settings themselves fail to load and so cannot supply one.
    pub fn error_output(&self) -> Option<&Path> {
        match &self.command {
            Commands::Split(args) => args.error_output.as_deref(),
            Commands::Check(_) => None,
        }
    }
}

impl From<&SplitArgs> for Overrides {
    fn from(args: &SplitArgs) -> Self {
        Overrides {
            epsilon: args.epsilon,
            output: args.output.clone(),
            error_output: args.error_output.clone(),
            quiet: args.quiet,
        }
    }
}

impl From<&CheckArgs> for Overrides {
    fn from(args: &CheckArgs) -> Self {
        Overrides {
            epsilon: args.epsilon,
            ..Overrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_arguments() {
        let cli = Cli::parse_from([
            "cartsplit",
            "-vv",
            "split",
            "cart.json",
            "-o",
            "out.json",
            "--error-output",
            "err.json",
            "--quiet",
            "--epsilon",
            "1e-9",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Split(args) = &cli.command else {
            panic!("expected split");
        };
        assert_eq!(args.input, PathBuf::from("cart.json"));
        assert_eq!(args.output.as_deref(), Some(Path::new("out.json")));
        assert!(args.quiet);
        assert_eq!(args.epsilon, Some(1e-9));
        assert_eq!(cli.error_output(), Some(Path::new("err.json")));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["cartsplit", "check", "cart.json", "-c", "custom.toml"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
        assert!(matches!(cli.command, Commands::Check(_)));
        assert_eq!(cli.error_output(), None);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["cartsplit", "split"]).is_err());
    }
}
