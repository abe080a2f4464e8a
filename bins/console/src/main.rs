//! Bankview console
//!
//! Signs in against the remote banking service, restores or establishes a
//! session, and prints a ledger snapshot: accounts, summaries, and the
//! first page of normalized transactions.

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bankview_client::{FileStorage, HttpBankingApi};
use bankview_core::ledger::{self, LedgerEntry, LedgerSummary, LedgerView, MonthlySummary};
use bankview_core::notify::{AlertPanel, NotificationHub};
use bankview_core::session::{Credentials, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bankview=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = bankview_shared::AppConfig::load()?;

    // Wire the IO edge into the state engine
    let api = HttpBankingApi::new(&config.api)?;
    let storage = FileStorage::from_config(&config.storage);
    let hub = NotificationHub::new();
    let panel = AlertPanel::new();
    let _panel_task = panel.attach(&hub);

    let mut session = SessionStore::new(api.clone(), storage);
    session.restore()?;

    if session.is_authenticated() {
        info!("session restored from {}", config.storage.session_file);
    } else if let (Ok(email), Ok(password)) = (
        std::env::var("BANKVIEW_EMAIL"),
        std::env::var("BANKVIEW_PASSWORD"),
    ) {
        let response = session
            .login(&Credentials { email, password })
            .await?;
        if !response.success {
            anyhow::bail!("login failed: {}", response.message);
        }
    } else {
        anyhow::bail!(
            "no persisted session; set BANKVIEW_EMAIL and BANKVIEW_PASSWORD to sign in"
        );
    }

    // Requests after this point carry the bearer token
    api.set_token(session.auth_token().map(str::to_string));

    let customer_id = session.current_user().map(|user| user.id);
    let accounts = api.fetch_accounts(customer_id).await?;
    info!(count = accounts.len(), "accounts fetched");

    println!("Accounts");
    for account in &accounts {
        println!("  {:>12}  {}", account.balance, account.display_name());
    }

    // Fetch and normalize every account's transactions
    let mut entries: Vec<LedgerEntry> = Vec::new();
    for account in &accounts {
        match api.fetch_transactions(Some(account.id)).await {
            Ok(raw) => entries.extend(raw.into_iter().map(|txn| LedgerEntry::from_raw(&txn))),
            Err(err) => warn!(account_id = account.id, %err, "transaction fetch failed"),
        }
    }

    let summary = LedgerSummary::compute(&entries);
    let monthly = MonthlySummary::for_month(&entries, Utc::now());
    println!("\nSummary");
    println!("  income     {:>12}", summary.total_income);
    println!("  expenses   {:>12}", summary.total_expenses);
    println!("  transfers  {:>12}", summary.total_transfers);
    println!("  net        {:>12}", summary.net_amount);
    println!("  this month {:>12} in, {:>12} out", monthly.income, monthly.expenses);

    let mut view = LedgerView::new();
    view.set_entries(entries);
    println!(
        "\nTransactions (page {} of {})",
        view.page(),
        view.total_pages()
    );
    for entry in view.current_page_entries() {
        println!(
            "  {}  {:>12}  {:<10}  {}",
            entry.txn_date.format("%Y-%m-%d"),
            entry.signed_amount,
            entry.category.as_str(),
            entry.description
        );
    }

    let recent = ledger::summary::recent(view.entries(), 5);
    println!("\nRecent activity");
    for entry in &recent {
        println!(
            "  {}  {:>12}  {}",
            entry.txn_date.format("%Y-%m-%d"),
            entry.signed_amount,
            entry.description
        );
    }

    for alert in panel.visible() {
        println!("\n[{}] {}", alert.severity, alert.message);
    }

    Ok(())
}
