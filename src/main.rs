use clap::{Parser, Subcommand};
use hubbank::application::client::LedgerClient;
use hubbank::domain::account::{AccountId, Balance, CreateAccountRequest};
use hubbank::domain::history::DirectionFilter;
use hubbank::domain::ports::{Authenticator, AuthenticatorBox, BankingApiBox};
use hubbank::domain::session::{Credentials, Session};
use hubbank::domain::transfer::{TransferDraft, validate};
use hubbank::infrastructure::http::HttpBankingApi;
use hubbank::infrastructure::in_memory::StaticAuthenticator;
use hubbank::interfaces::csv::account_writer::AccountWriter;
use hubbank::interfaces::csv::history_writer::HistoryWriter;
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the banking backend
    #[arg(long, env = "HUBBANK_API_URL", default_value = HttpBankingApi::DEFAULT_BASE_URL)]
    base_url: String,

    /// Admin username accepted by this client
    #[arg(long, env = "HUBBANK_ADMIN_USER", default_value = "admin")]
    admin_user: String,

    /// Admin password accepted by this client; admin commands fail when unset
    #[arg(long, env = "HUBBANK_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct AdminArgs {
    /// Username presented for admin operations
    #[arg(long, default_value = "admin")]
    user: String,

    /// Password presented for admin operations
    #[arg(long, default_value = "")]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Preview a transfer against the overdraft limit without contacting the backend
    Check {
        #[arg(long, allow_hyphen_values = true)]
        balance: Decimal,
        /// Amount as typed; unparsable input counts as zero
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        amount: String,
        /// Destination account id
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Submit a transfer
    Transfer {
        #[arg(long)]
        from: AccountId,
        #[arg(long, default_value = "")]
        to: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        amount: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Print the transaction history of an account as CSV
    History {
        account_id: AccountId,
        #[arg(long, default_value = "all")]
        filter: DirectionFilter,
        /// Only show transactions whose counterparty or id contains this text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List all accounts as CSV
    Accounts {
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Create a new account
    CreateAccount {
        #[arg(long)]
        number: String,
        #[arg(long)]
        owner: String,
        #[arg(long, default_value = "0")]
        balance: Decimal,
        #[command(flatten)]
        admin: AdminArgs,
    },
}

fn authenticator(cli: &Cli) -> Result<AuthenticatorBox> {
    let password = cli
        .admin_password
        .as_deref()
        .ok_or_else(|| miette!("Admin password is not configured (set HUBBANK_ADMIN_PASSWORD)"))?;
    Ok(Box::new(StaticAuthenticator::new(&cli.admin_user, password)))
}

async fn login(authenticator: Result<AuthenticatorBox>, admin: &AdminArgs) -> Result<Session> {
    authenticator?
        .authenticate(&Credentials::new(&admin.user, &admin.password))
        .await
        .into_diagnostic()
}

fn check(balance: Decimal, amount: &str, to: &str) -> Result<()> {
    let draft = TransferDraft::from_input(amount, to);
    let check = validate(Balance::new(balance), draft.amount, draft.destination);
    println!("current_balance: {:.2}", balance);
    println!("amount: {:.2}", check.amount());
    println!("projected_balance: {}", check.projected_balance);
    if check.uses_overdraft() {
        println!("warning: projected balance is negative");
    }
    match check.reason {
        None => {
            println!("status: ok");
            Ok(())
        }
        Some(reason) => {
            println!("status: rejected");
            Err(miette!("Transfer rejected: {}", reason))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let auth = authenticator(&cli);
    let api: BankingApiBox = Box::new(HttpBankingApi::new(cli.base_url));
    let client = LedgerClient::new(api);

    match cli.command {
        Command::Check {
            balance,
            amount,
            to,
        } => check(balance, &amount, &to)?,
        Command::Transfer {
            from,
            to,
            amount,
            admin,
        } => {
            let session = login(auth, &admin).await?;
            let account = client.find_account(&session, from).await.into_diagnostic()?;
            let draft = TransferDraft::from_input(&amount, &to);
            let confirmation = client
                .submit_transfer(&account, &draft)
                .await
                .into_diagnostic()?;
            println!("{}", confirmation);
        }
        Command::History {
            account_id,
            filter,
            search,
        } => {
            let history = client
                .history(account_id, filter, &search)
                .await
                .into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = HistoryWriter::new(stdout.lock());
            writer.write_history(&history.items).into_diagnostic()?;
            eprintln!(
                "sent: {:.2} ({}), received: {:.2} ({}), net: {:.2}",
                history.summary.total_sent,
                history.summary.sent_count,
                history.summary.total_received,
                history.summary.received_count,
                history.summary.net()
            );
        }
        Command::Accounts { admin } => {
            let session = login(auth, &admin).await?;
            let accounts = client.accounts(&session).await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = AccountWriter::new(stdout.lock());
            writer.write_accounts(&accounts).into_diagnostic()?;
        }
        Command::CreateAccount {
            number,
            owner,
            balance,
            admin,
        } => {
            let session = login(auth, &admin).await?;
            let request = CreateAccountRequest::new(number, owner, Balance::new(balance));
            let account = client
                .create_account(&session, request)
                .await
                .into_diagnostic()?;
            println!(
                "Created account {} ({}) for {}",
                account.id, account.account_number, account.owner_name
            );
        }
    }

    Ok(())
}
