use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ripplet", version, about = "Ripplet developer CLI for XRPL transactions")]
pub struct Cli {
    /// Directory holding the persisted wallet session.
    #[arg(long, global = true, env = "RIPPLET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Start from a default session and persist nothing; `--data-dir` is ignored.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the supported networks and their endpoints.
    Networks,
    /// Inspect or change the stored wallet session.
    #[command(subcommand)]
    Session(SessionCommand),
    /// Validate form fields and print the transaction JSON.
    Build(BuildArgs),
    /// Look up a submitted transaction by hash.
    Tx(TxArgs),
    /// Show balance and sequence for an account.
    Account(AccountArgs),
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    Show,
    /// Select the network (mainnet, testnet, devnet).
    Network { network: String },
    /// Record a wallet connection.
    Connect {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        address: String,
    },
    Disconnect,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Transaction kind, as a route slug (`trust-set`) or ledger name (`TrustSet`).
    pub kind: String,
    /// Form field as `name=value`; repeatable.
    #[arg(long = "field", short = 'f', value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct TxArgs {
    pub hash: String,
    /// Defaults to the session network.
    #[arg(long)]
    pub network: Option<String>,
    /// Poll until the transaction is validated or fails for good.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Debug, Args)]
pub struct AccountArgs {
    pub address: String,
    #[arg(long)]
    pub network: Option<String>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_owned(), value.to_owned())),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_collects_repeated_fields() {
        let cli = Cli::try_parse_from([
            "ripplet",
            "build",
            "offer-cancel",
            "--field",
            "account=rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "-f",
            "offer_sequence=5",
        ])
        .unwrap();

        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.kind, "offer-cancel");
        assert_eq!(args.fields[1], ("offer_sequence".to_owned(), "5".to_owned()));
    }

    #[test]
    fn malformed_field_is_rejected() {
        assert!(Cli::try_parse_from(["ripplet", "build", "payment", "--field", "amount"]).is_err());
    }

    #[test]
    fn ephemeral_is_a_global_flag() {
        let cli = Cli::try_parse_from(["ripplet", "session", "show", "--ephemeral"]).unwrap();
        assert!(cli.ephemeral);
        let cli = Cli::try_parse_from(["ripplet", "tx", "ABC", "--wait"]).unwrap();
        assert!(!cli.ephemeral);
        assert!(matches!(cli.command, Command::Tx(TxArgs { wait: true, .. })));
    }

    #[test]
    fn session_connect_requires_wallet_and_address() {
        assert!(Cli::try_parse_from(["ripplet", "session", "connect", "--wallet", "xaman"]).is_err());
    }
}
