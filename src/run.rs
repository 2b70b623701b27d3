use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

use crate::aggregate::{KindFilter, DEFAULT_SERIES_MONTHS};
use crate::auth::Auth;
use crate::format::format_amount;
use crate::models::{PeriodKind, TransactionDraft, TxnKind};
use crate::session::Session;
use crate::store::KvStore;

pub(crate) fn as_cli(args: &[String], kv: KvStore) -> Result<()> {
    match args[1].as_str() {
        "signup" => cli_signup(&args[2..], &kv),
        "login" => cli_login(&args[2..], &kv),
        "logout" => cli_logout(&kv),
        "whoami" => cli_whoami(&kv),
        "summary" | "s" => cli_summary(&open_session(kv)?),
        "list" | "ls" => cli_list(&args[2..], &open_session(kv)?),
        "add" => cli_add(&args[2..], &mut open_session(kv)?),
        "delete" | "rm" => cli_delete(&args[2..], &mut open_session(kv)?),
        "budgets" => cli_budgets(&args[2..], &mut open_session(kv)?),
        "report" => cli_report(&args[2..], &open_session(kv)?),
        "chart" => cli_chart(&args[2..], &open_session(kv)?),
        "export" => cli_export(&args[2..], &open_session(kv)?),
        "reset" => cli_reset(&kv),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Ledgerbook — local-only personal finance ledger");
    println!();
    println!("Usage: ledgerbook <command>");
    println!();
    println!("Commands:");
    println!("  signup <name> <email>         Create an account (prompts for password)");
    println!("  login <email>                 Sign in (prompts for password)");
    println!("  logout                        Sign out");
    println!("  whoami                        Show the signed-in user");
    println!("  summary                       Balance, totals, and savings progress");
    println!("  list                          List transactions, most recent first");
    println!("    --filter <income|expense>   Restrict by type");
    println!("    --search <term>             Match description or category");
    println!("  add --desc <text> --amount <n>");
    println!("    --kind <income|expense>     Default: expense");
    println!("    --category <name>           Default: Other");
    println!("    --date <YYYY-MM-DD>         Default: today");
    println!("    --save-to-wallet            Move the amount into the savings wallet");
    println!("  delete <id>                   Remove a transaction");
    println!("  budgets [set Cat=Limit ...]   Show burn-down, or update limits");
    println!("  report [period]               thisMonth|lastMonth|thisYear|lastYear|all");
    println!("  chart [months]                Monthly income/expense series (default 6)");
    println!("  export [path]                 Export transactions to CSV");
    println!("  reset                         Delete the signed-in user's data");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn open_session(kv: KvStore) -> Result<Session> {
    let auth = Auth::new(&kv);
    let Some(user) = auth.current_user()? else {
        anyhow::bail!("Not logged in. Run `ledgerbook login <email>` first.");
    };
    Session::open(kv, user)
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// ── Auth commands ─────────────────────────────────────────────

fn cli_signup(args: &[String], kv: &KvStore) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: ledgerbook signup <name> <email>");
    }
    let password = prompt("Password")?;
    let confirm = prompt("Confirm password")?;

    let auth = Auth::new(kv);
    auth.sign_up(&args[0], &args[1], &password, &confirm)?;
    println!("Account created. Signed in as {}", args[1].to_lowercase());
    Ok(())
}

fn cli_login(args: &[String], kv: &KvStore) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: ledgerbook login <email>");
    }
    let password = prompt("Password")?;

    let auth = Auth::new(kv);
    auth.log_in(&args[0], &password)?;
    println!("Signed in as {}", args[0].to_lowercase());
    Ok(())
}

fn cli_logout(kv: &KvStore) -> Result<()> {
    let auth = Auth::new(kv);
    if !auth.is_logged_in()? {
        println!("Not logged in");
        return Ok(());
    }
    auth.clear_current_user()?;
    println!("Signed out");
    Ok(())
}

fn cli_whoami(kv: &KvStore) -> Result<()> {
    let auth = Auth::new(kv);
    match auth.current_user()? {
        Some(email) => {
            let name = auth.user_name(&email)?.unwrap_or_else(|| "User".into());
            println!("{name} <{email}>");
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

// ── Ledger commands ───────────────────────────────────────────

fn cli_summary(session: &Session) -> Result<()> {
    let summary = session.summary();
    let wallet = session.wallet();
    let progress = session.savings_progress();

    println!("Ledgerbook — {}", session.user());
    println!("{}", "─".repeat(40));
    println!("  Income:    {}", format_amount(summary.income_total));
    println!("  Expenses:  {}", format_amount(summary.expense_total));
    println!("  Balance:   {}", format_amount(summary.balance));
    println!("  Wallet:    {}", format_amount(wallet));
    println!("  Savings:   {progress:.0}% of the 30% income goal");
    Ok(())
}

fn cli_list(args: &[String], session: &Session) -> Result<()> {
    let kind = args
        .windows(2)
        .find(|w| w[0] == "--filter")
        .and_then(|w| KindFilter::parse(&w[1]))
        .unwrap_or(KindFilter::All);
    let search = args
        .windows(2)
        .find(|w| w[0] == "--search")
        .map(|w| w[1].as_str())
        .unwrap_or("");

    let txns = session.filtered_transactions(kind, search);
    if txns.is_empty() {
        println!("No transactions found");
        return Ok(());
    }

    println!(
        "{:<15} {:<12} {:<8} {:<16} {:>14}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(80));
    for t in &txns {
        let sign = if t.is_income() { "+" } else { "-" };
        println!(
            "{:<15} {:<12} {:<8} {:<16} {:>14}  {}",
            t.id,
            t.date,
            t.kind,
            t.category,
            format!("{sign}{}", format_amount(t.amount)),
            t.desc,
        );
    }
    Ok(())
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    let flag = |name: &str| {
        args.windows(2)
            .find(|w| w[0] == name)
            .map(|w| w[1].clone())
    };

    let desc = flag("--desc").unwrap_or_default();
    let amount = flag("--amount")
        .and_then(|a| Decimal::from_str(&a).ok())
        .unwrap_or(Decimal::ZERO);
    let kind = flag("--kind")
        .and_then(|k| TxnKind::parse(&k))
        .unwrap_or(TxnKind::Expense);
    let category = flag("--category").unwrap_or_else(|| "Other".into());
    let date = match flag("--date") {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date: {raw} (expected YYYY-MM-DD)"))?,
        None => chrono::Local::now().date_naive(),
    };
    let save_to_wallet = args.iter().any(|a| a == "--save-to-wallet");

    let draft = TransactionDraft {
        desc,
        amount,
        kind,
        category,
        date,
    };
    let txn = session.add_transaction(draft, save_to_wallet)?;

    let sign = if txn.is_expense() { "-" } else { "+" };
    println!(
        "Added {} {} {} [{}] (id {})",
        txn.date,
        sign,
        format_amount(txn.amount),
        txn.category,
        txn.id
    );
    if save_to_wallet {
        println!("Wallet balance: {}", format_amount(session.wallet()));
    }
    Ok(())
}

fn cli_delete(args: &[String], session: &mut Session) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: ledgerbook delete <id>");
    }
    let id: i64 = args[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid id: {}", args[0]))?;

    if session.delete_transaction(id)? {
        println!("Deleted transaction {id}");
    } else {
        println!("No transaction with id {id}");
    }
    Ok(())
}

fn cli_budgets(args: &[String], session: &mut Session) -> Result<()> {
    if args.first().is_some_and(|a| a == "set") {
        let mut updates: BTreeMap<String, Decimal> = BTreeMap::new();
        for pair in &args[1..] {
            let Some((category, raw)) = pair.split_once('=') else {
                anyhow::bail!("Expected Category=Limit, got: {pair}");
            };
            let limit = Decimal::from_str(raw)
                .map_err(|_| anyhow::anyhow!("Invalid limit for {category}: {raw}"))?;
            updates.insert(category.to_string(), limit);
        }
        if updates.is_empty() {
            anyhow::bail!("Usage: ledgerbook budgets set Category=Limit [Category=Limit ...]");
        }
        session.set_budget_limits(&updates)?;
        println!("Updated {} budget limit(s)", updates.len());
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let rows = session.budget_utilization(today);
    if rows.is_empty() {
        println!("No budget categories set");
        return Ok(());
    }

    println!(
        "{:<16} {:>14} {:>14} {:>6}  Status",
        "Category", "Spent", "Limit", "%"
    );
    println!("{}", "─".repeat(64));
    for row in &rows {
        println!(
            "{:<16} {:>14} {:>14} {:>5.0}%  {}",
            row.category,
            format_amount(row.spent),
            format_amount(row.limit),
            row.percentage,
            row.severity,
        );
    }
    Ok(())
}

fn cli_report(args: &[String], session: &Session) -> Result<()> {
    let kind = match args.first() {
        Some(raw) => PeriodKind::parse(raw).ok_or_else(|| {
            let valid: Vec<&str> = PeriodKind::all_kinds().iter().map(|k| k.as_str()).collect();
            anyhow::anyhow!("Unknown period: {raw} (expected one of {})", valid.join(", "))
        })?,
        None => PeriodKind::ThisMonth,
    };

    let today = chrono::Local::now().date_naive();
    let (period, summary) = session.report_summary(kind, today);

    println!("Report — {kind}");
    if kind != PeriodKind::All {
        println!("  Period:    {} to {}", period.start, period.end);
    }
    println!("  Income:    {}", format_amount(summary.income_total));
    println!("  Expenses:  {}", format_amount(summary.expense_total));
    println!("  Net:       {}", format_amount(summary.balance));

    let by_category = session.category_totals(&period);
    if !by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &by_category {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }
    Ok(())
}

fn cli_chart(args: &[String], session: &Session) -> Result<()> {
    let months: u32 = args
        .first()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_SERIES_MONTHS);

    let today = chrono::Local::now().date_naive();
    let series = session.monthly_series(months, today);

    println!("{:<8} {:>16} {:>16}", "Month", "Income", "Expenses");
    println!("{}", "─".repeat(42));
    for bucket in &series {
        println!(
            "{:<8} {:>16} {:>16}",
            bucket.label,
            format_amount(bucket.income),
            format_amount(bucket.expense),
        );
    }
    Ok(())
}

fn cli_export(args: &[String], session: &Session) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/ledgerbook-export.csv")
        });

    let count =
        crate::export::export_to_path(std::path::Path::new(&output_path), session.transactions())?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cli_reset(kv: &KvStore) -> Result<()> {
    let auth = Auth::new(kv);
    let Some(user) = auth.current_user()? else {
        anyhow::bail!("Not logged in");
    };

    let answer = prompt(&format!(
        "Delete all data for {user}? This cannot be undone. Type 'yes' to confirm"
    ))?;
    if answer.trim() != "yes" {
        println!("Aborted");
        return Ok(());
    }

    let suffix = format!("_{user}");
    for base in ["transactions", "budgetLimits", "savingsWallet"] {
        for key in kv.keys_like(&format!("{base}%"))? {
            if key.ends_with(&suffix) {
                kv.remove(&key)?;
            }
        }
    }
    println!("Data reset for {user}");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
