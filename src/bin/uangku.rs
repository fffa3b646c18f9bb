//! The command-line view for uangku.
//!
//! Reads the stores, renders balances and reports, and writes user input
//! back, which is everything the view layer does.

use std::{fs, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use uangku::{
    Error,
    currency::format_idr,
    dashboard, export, history,
    models::{CategoryName, Transaction, TransactionType},
    reports::{self, Period, TypeBreakdown},
    storage::{FileStorage, StorageBackend},
    stores::{CategoryStore, JsonCategoryStore, JsonTransactionStore, TransactionStore},
};

/// A personal finance tracker: record income and expenses, organise them
/// into categories, and inspect balances and period reports.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where the JSON documents are stored.
    #[arg(long, default_value = "uangku-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an income transaction.
    AddIncome {
        /// The amount in rupiah.
        amount: f64,
        /// What the transaction was for.
        description: String,
        /// The income category to file it under.
        category: String,
    },
    /// Record an expense transaction.
    AddExpense {
        /// The amount in rupiah.
        amount: f64,
        /// What the transaction was for.
        description: String,
        /// The expense category to file it under.
        category: String,
    },
    /// Show the all-time balance and the most recent transactions.
    Dashboard,
    /// List the transaction history, newest first.
    Transactions {
        /// Only show one transaction type.
        #[arg(long, value_enum, default_value = "all")]
        r#type: TypeFilterArg,
        /// Case-insensitive search over description and category.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Manage the income and expense categories.
    Categories {
        #[command(subcommand)]
        action: CategoryCommand,
    },
    /// Show the per-category report for a period.
    Report {
        /// The selection window, ending now.
        #[arg(long, value_enum, default_value = "month")]
        period: PeriodArg,
    },
    /// Export all data to a JSON backup file.
    Export {
        /// Where to write the backup.
        path: PathBuf,
    },
    /// Import a JSON backup, replacing all stored data.
    Import {
        /// The backup file to restore.
        path: PathBuf,
        /// Skip the confirmation check.
        #[arg(long)]
        yes: bool,
    },
    /// Delete all stored data.
    Clear {
        /// Skip the confirmation check.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// List all categories with their usage counts.
    List,
    /// Add a category.
    Add {
        /// Which list to add it to.
        #[arg(value_enum)]
        r#type: TypeArg,
        /// The category name.
        name: String,
    },
    /// Remove a custom, unused category.
    Remove {
        /// Which list to remove it from.
        #[arg(value_enum)]
        r#type: TypeArg,
        /// The category name.
        name: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TypeArg {
    Income,
    Expense,
}

impl From<TypeArg> for TransactionType {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::Income => TransactionType::Income,
            TypeArg::Expense => TransactionType::Expense,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TypeFilterArg {
    All,
    Income,
    Expense,
}

impl From<TypeFilterArg> for history::TypeFilter {
    fn from(value: TypeFilterArg) -> Self {
        match value {
            TypeFilterArg::All => history::TypeFilter::All,
            TypeFilterArg::Income => history::TypeFilter::Income,
            TypeFilterArg::Expense => history::TypeFilter::Expense,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PeriodArg {
    Week,
    Month,
    Year,
}

impl From<PeriodArg> for Period {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::Year => Period::Year,
        }
    }
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn run(args: Args) -> Result<ExitCode, Error> {
    // Destructive commands need confirmation up front. A declined
    // confirmation exits with failure so scripts can tell nothing ran.
    match args.command {
        Command::Import { yes: false, .. } => {
            eprintln!("Importing replaces all stored data. Re-run with --yes to continue.");
            return Ok(ExitCode::FAILURE);
        }
        Command::Clear { yes: false } => {
            eprintln!("This deletes all stored data. Re-run with --yes to continue.");
            return Ok(ExitCode::FAILURE);
        }
        _ => {}
    }

    let storage: Arc<dyn StorageBackend> = Arc::new(FileStorage::open(&args.data_dir)?);
    let transactions = JsonTransactionStore::new(storage.clone());
    let categories = JsonCategoryStore::new(storage.clone());

    match args.command {
        Command::AddIncome {
            amount,
            description,
            category,
        } => add_transaction(
            &transactions,
            &categories,
            TransactionType::Income,
            amount,
            &description,
            &category,
        ),
        Command::AddExpense {
            amount,
            description,
            category,
        } => add_transaction(
            &transactions,
            &categories,
            TransactionType::Expense,
            amount,
            &description,
            &category,
        ),
        Command::Dashboard => show_dashboard(&transactions),
        Command::Transactions { r#type, search } => {
            show_transactions(&transactions, r#type.into(), &search)
        }
        Command::Categories { action } => match action {
            CategoryCommand::List => list_categories(&categories),
            CategoryCommand::Add { r#type, name } => {
                categories.add(r#type.into(), CategoryName::new(&name)?)?;
                println!("Added {} category \"{name}\".", TransactionType::from(r#type));
                Ok(())
            }
            CategoryCommand::Remove { r#type, name } => {
                categories.delete(r#type.into(), &CategoryName::new(&name)?)?;
                println!("Removed {} category \"{name}\".", TransactionType::from(r#type));
                Ok(())
            }
        },
        Command::Report { period } => show_report(&transactions, period.into()),
        Command::Export { path } => {
            let snapshot = export::export(&transactions, &categories, OffsetDateTime::now_utc())?;
            fs::write(&path, snapshot.to_json()?)?;
            println!(
                "Exported {} transaction(s) to {}.",
                snapshot.transactions.len(),
                path.display()
            );
            Ok(())
        }
        Command::Import { path, .. } => {
            let snapshot = export::Snapshot::from_json(&fs::read_to_string(&path)?)?;
            export::import(storage.as_ref(), &snapshot)?;
            println!(
                "Imported {} transaction(s) from {}.",
                snapshot.transactions.len(),
                path.display()
            );
            Ok(())
        }
        Command::Clear { .. } => {
            export::clear(storage.as_ref())?;
            println!("All data cleared.");
            Ok(())
        }
    }?;

    Ok(ExitCode::SUCCESS)
}

fn add_transaction(
    transactions: &JsonTransactionStore,
    categories: &JsonCategoryStore,
    kind: TransactionType,
    amount: f64,
    description: &str,
    category: &str,
) -> Result<(), Error> {
    // Mirror the form in the original app: only categories from the list for
    // the given type can be picked.
    let name = CategoryName::new(category)?;
    if !categories.get_all()?.contains(kind, &name) {
        return Err(Error::CategoryNotFound {
            kind,
            name: name.to_string(),
        });
    }

    let transaction =
        transactions.create(Transaction::build(kind, amount, description, name.as_ref()))?;
    println!(
        "Recorded {} {} \"{}\" in {}.",
        transaction.kind,
        format_idr(transaction.amount),
        transaction.description,
        transaction.category
    );

    Ok(())
}

fn show_dashboard(transactions: &JsonTransactionStore) -> Result<(), Error> {
    let history = transactions.get_all()?;
    let totals = dashboard::totals(&history);

    println!("Saldo Total : {}", format_idr(totals.balance));
    println!("Pemasukan   : {}", format_idr(totals.income));
    println!("Pengeluaran : {}", format_idr(totals.expense));

    let recent = dashboard::recent(&history, 5);
    if recent.is_empty() {
        println!("\nBelum ada transaksi.");
    } else {
        println!("\nTransaksi Terbaru:");
        for transaction in recent {
            print_transaction(transaction);
        }
    }

    Ok(())
}

fn show_transactions(
    transactions: &JsonTransactionStore,
    filter: history::TypeFilter,
    search: &str,
) -> Result<(), Error> {
    let all = transactions.get_all()?;

    for transaction in history::search(&all, filter, search) {
        print_transaction(transaction);
    }

    Ok(())
}

fn print_transaction(transaction: &Transaction) {
    let sign = match transaction.kind {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };

    println!(
        "{}  {}{:<14} {} ({})",
        transaction.date.date(),
        sign,
        format_idr(transaction.amount),
        transaction.description,
        transaction.category
    );
}

fn list_categories(categories: &JsonCategoryStore) -> Result<(), Error> {
    let all = categories.get_all()?;

    for kind in [TransactionType::Income, TransactionType::Expense] {
        println!("{kind}:");
        for name in all.list(kind) {
            let count = categories.usage_count(kind, name)?;
            println!("  {name} ({count} transaksi)");
        }
    }

    Ok(())
}

fn show_report(transactions: &JsonTransactionStore, period: Period) -> Result<(), Error> {
    let history = transactions.get_all()?;
    let report = reports::report(&history, period, OffsetDateTime::now_utc());

    print_breakdown("Pemasukan", &report.income);
    print_breakdown("Pengeluaran", &report.expense);
    println!("\nSelisih: {}", format_idr(report.net()));

    Ok(())
}

fn print_breakdown(label: &str, breakdown: &TypeBreakdown) {
    println!("{label}: {}", format_idr(breakdown.total));

    for summary in &breakdown.categories {
        println!(
            "  {:<12} {:>14}  {:>5.1}%  ({} transaksi)",
            summary.category,
            format_idr(summary.amount),
            summary.percentage,
            summary.count
        );
    }
}
