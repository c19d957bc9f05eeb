use crate::cli::{AccountArgs, BuildArgs, Command, SessionCommand, TxArgs};
use crate::config::{Config, parse_network};
use anyhow::{Context, Result, anyhow, bail};
use rp_api_types::{NetworkKind, WalletKind, WalletSession, network};
use rp_ledger_client::LedgerClient;
use rp_ledger_xrpl::XrplRpcConnector;
use rp_storage::{NoopSessionStorage, RocksDbSessionStorage, SessionStorage};
use rp_tx_builders::validate::is_valid_address;
use rp_tx_builders::{DynamicForm, PrepareError, TransactionForm, TransactionKind};
use rp_wallet_core::WalletStore;
use std::io::Write;
use std::rc::Rc;
use tracing::info;

pub fn networks(out: &mut impl Write) -> Result<()> {
    for descriptor in network::all() {
        writeln!(
            out,
            "{:<8} [{}] rpc={} ws={} explorer={}",
            descriptor.kind.as_str(),
            descriptor.kind.badge(),
            descriptor.query_endpoint_http,
            descriptor.query_endpoint_ws,
            descriptor.explorer_base_url
        )?;
    }
    Ok(())
}

pub fn open_store(config: &Config) -> Result<WalletStore<RocksDbSessionStorage>> {
    config.ensure_data_dir()?;
    let storage = RocksDbSessionStorage::open_default(config.session_dir())?;
    Ok(WalletStore::load(storage))
}

/// Session that starts from defaults and is dropped on exit.
pub fn ephemeral_store() -> WalletStore<NoopSessionStorage> {
    WalletStore::load(NoopSessionStorage)
}

/// Runs the commands that read or change the wallet session.
pub async fn run_with_store<S: SessionStorage>(
    store: &WalletStore<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Session(command) => session(store, command, out),
        Command::Tx(args) => tx(store, args, out).await,
        Command::Account(args) => account(store, args, out).await,
        Command::Networks => networks(out),
        Command::Build(args) => build(args, out),
    }
}

pub fn session<S: SessionStorage>(store: &WalletStore<S>, command: SessionCommand, out: &mut impl Write) -> Result<()> {
    let snapshot = match command {
        SessionCommand::Show => store.session(),
        SessionCommand::Network { network } => store.set_network(parse_network(&network)?),
        SessionCommand::Connect { wallet, address } => {
            let kind = WalletKind::parse(&wallet).ok_or_else(|| anyhow!("unknown wallet '{wallet}'"))?;
            if !is_valid_address(&address) {
                bail!("'{address}' is not a valid XRPL address");
            }
            store.connect(kind, address)
        }
        SessionCommand::Disconnect => store.disconnect(),
    };
    print_session(&snapshot, out)
}

fn print_session(session: &WalletSession, out: &mut impl Write) -> Result<()> {
    writeln!(out, "network:   {} [{}]", session.network, session.network.badge())?;
    writeln!(out, "connected: {}", session.connected)?;
    writeln!(
        out,
        "wallet:    {}",
        session.wallet_kind.map_or("-", |kind| kind.display_name())
    )?;
    writeln!(out, "address:   {}", session.address.as_deref().unwrap_or("-"))?;
    Ok(())
}

pub fn build(args: BuildArgs, out: &mut impl Write) -> Result<()> {
    let kind = TransactionKind::parse(&args.kind).ok_or_else(|| anyhow!("unknown transaction kind '{}'", args.kind))?;
    let form = DynamicForm::from_pairs(kind, args.fields.iter().map(|(name, value)| (name.as_str(), value.as_str())));

    match form.prepare() {
        Ok(transaction) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&transaction)?)?;
            Ok(())
        }
        Err(PrepareError::Form(errors)) => {
            for (field, message) in errors.iter() {
                writeln!(out, "{field}: {message}")?;
            }
            bail!("{} field(s) failed validation", errors.len())
        }
        Err(err) => Err(err).context("failed to build transaction"),
    }
}

fn resolve_network<S: SessionStorage>(store: &WalletStore<S>, requested: Option<&str>) -> Result<NetworkKind> {
    match requested {
        Some(value) => parse_network(value),
        None => Ok(store.network()),
    }
}

async fn ledger_for(network: NetworkKind) -> Result<LedgerClient> {
    let ledger = LedgerClient::new(Rc::new(XrplRpcConnector::new()));
    ledger
        .connect_to(network)
        .await
        .with_context(|| format!("failed to reach {network}"))?;
    Ok(ledger)
}

pub async fn tx<S: SessionStorage>(store: &WalletStore<S>, args: TxArgs, out: &mut impl Write) -> Result<()> {
    let network = resolve_network(store, args.network.as_deref())?;
    let ledger = ledger_for(network).await?;
    let outcome = if args.wait {
        ledger.await_outcome(&args.hash).await?
    } else {
        ledger.fetch_outcome(&args.hash).await?
    };
    info!(hash = %outcome.hash, code = %outcome.result_code, "transaction fetched");

    let ledger_index = outcome.ledger_index;
    let result = outcome.into_submission_result();
    writeln!(out, "hash:      {}", result.transaction_hash)?;
    writeln!(out, "result:    {}", result.result_code)?;
    writeln!(out, "success:   {}", result.success)?;
    if let Some(index) = ledger_index {
        writeln!(out, "ledger:    {index}")?;
    }
    if let Some(message) = &result.message {
        writeln!(out, "note:      {message}")?;
    }
    writeln!(
        out,
        "explorer:  {}",
        network.descriptor().explorer_tx_url(&result.transaction_hash)
    )?;
    Ok(())
}

pub async fn account<S: SessionStorage>(store: &WalletStore<S>, args: AccountArgs, out: &mut impl Write) -> Result<()> {
    if !is_valid_address(&args.address) {
        bail!("'{}' is not a valid XRPL address", args.address);
    }
    let network = resolve_network(store, args.network.as_deref())?;
    let ledger = ledger_for(network).await?;
    let summary = ledger.account_info(&args.address).await?;

    writeln!(out, "account:   {}", summary.address)?;
    writeln!(out, "balance:   {} XRP", summary.balance_xrp())?;
    writeln!(out, "sequence:  {}", summary.sequence)?;
    writeln!(out, "objects:   {}", summary.owner_count)?;
    writeln!(
        out,
        "explorer:  {}",
        network.descriptor().explorer_account_url(&summary.address)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_storage::InMemorySessionStorage;

    const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> (Result<()>, String) {
        let mut buffer = Vec::new();
        let result = run(&mut buffer);
        (result, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn networks_lists_every_registry_entry() {
        let (result, text) = output(|out| networks(out));
        result.unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("https://testnet.xrpl.org"));
    }

    #[test]
    fn session_commands_drive_the_store() {
        let store = WalletStore::load(InMemorySessionStorage::default());

        let (result, text) = output(|out| {
            session(
                &store,
                SessionCommand::Connect {
                    wallet: "crossmark".into(),
                    address: ALICE.into(),
                },
                out,
            )
        });
        result.unwrap();
        assert!(text.contains("Crossmark"));

        let (result, text) = output(|out| session(&store, SessionCommand::Network { network: "devnet".into() }, out));
        result.unwrap();
        assert!(text.contains("devnet [Dev]"));

        let (result, _) = output(|out| session(&store, SessionCommand::Disconnect, out));
        result.unwrap();
        assert!(!store.connected());
        assert_eq!(store.network(), NetworkKind::Devnet);
    }

    #[test]
    fn session_connect_rejects_bad_input() {
        let store = WalletStore::load(InMemorySessionStorage::default());
        let (result, _) = output(|out| {
            session(
                &store,
                SessionCommand::Connect {
                    wallet: "metamask".into(),
                    address: ALICE.into(),
                },
                out,
            )
        });
        assert!(result.is_err());
        assert!(!store.connected());
    }

    #[test]
    fn build_prints_transaction_json() {
        let args = BuildArgs {
            kind: "TrustSet".into(),
            fields: vec![
                ("account".into(), ALICE.into()),
                ("currency".into(), "USD".into()),
                ("issuer".into(), "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".into()),
                ("limit".into(), "500".into()),
            ],
        };
        let (result, text) = output(|out| build(args, out));
        result.unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["TransactionType"], "TrustSet");
        assert_eq!(json["LimitAmount"]["value"], "500");
    }

    #[test]
    fn build_reports_field_errors() {
        let args = BuildArgs {
            kind: "trust-set".into(),
            fields: vec![("account".into(), ALICE.into()), ("issuer".into(), "rInvalidAddr".into())],
        };
        let (result, text) = output(|out| build(args, out));
        assert!(result.is_err());
        assert!(text.contains("issuer: Invalid XRPL address"));
        assert!(text.contains("currency: This field is required"));
    }

    #[tokio::test]
    async fn ephemeral_session_is_not_kept() {
        let store = ephemeral_store();
        let mut buffer = Vec::new();
        let command = Command::Session(SessionCommand::Network { network: "testnet".into() });
        run_with_store(&store, command, &mut buffer).await.unwrap();

        assert!(String::from_utf8(buffer).unwrap().contains("testnet [Test]"));
        assert_eq!(store.network(), NetworkKind::Testnet);

        let reloaded = ephemeral_store();
        assert_eq!(reloaded.network(), NetworkKind::Mainnet);
        assert!(!reloaded.connected());
    }

    #[test]
    fn rocksdb_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(Some(dir.path().to_path_buf()));
        {
            let store = open_store(&config).unwrap();
            store.set_network(NetworkKind::Testnet);
        }
        let store = open_store(&config).unwrap();
        assert_eq!(store.network(), NetworkKind::Testnet);
    }
}
