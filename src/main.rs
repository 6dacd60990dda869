use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use caja::api::ApiClient;
use caja::config::{self, load_config, CONFIG_TEMPLATE};
use caja::confirm::{select_confirmer, Confirmer};
use caja::error::{CajaError, Result};
use caja::notify;
use caja::payment::{
    plan_full_payment, plan_partial_payment, round_money, Calculator, FullPaymentPlan,
    PartialPaymentPlan, PaymentMethod, VoidIntent,
};

#[derive(Parser)]
#[command(name = "caja")]
#[command(version, about = "CLI payment terminal for PetGlow invoices", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.caja or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Skip confirmation prompts (for scripted use)
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template file
    Init,

    /// Show config and backend connectivity
    Status,

    /// Show an invoice's totals, balance, and available actions
    Show {
        /// Invoice id
        invoice: u64,
    },

    /// Register a payment against an invoice (full unless --amount is given)
    Pay {
        /// Invoice id
        invoice: u64,

        /// Partial amount; omit to settle the full outstanding balance
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// Payment method
        #[arg(short, long, value_enum)]
        method: PaymentMethod,

        /// Free-text reference (e.g., operation number)
        #[arg(short, long)]
        reference: Option<String>,

        /// Compose the amount interactively instead of passing --amount
        #[arg(long, conflicts_with = "amount")]
        calc: bool,
    },

    /// Void an invoice (irreversible)
    Void {
        /// Invoice id
        invoice: u64,

        /// Optional reason attached to the void request
        #[arg(short = 'm', long)]
        reason: Option<String>,
    },

    /// List accepted payment methods
    Methods,
}

fn main() {
    if let Err(e) = run() {
        notify::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config::config_dir()?,
    };

    // Pick the confirmer for this invocation
    let confirmer = select_confirmer(cli.yes);

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Show { invoice } => cmd_show(&cfg_dir, invoice),
        Commands::Pay {
            invoice,
            amount,
            method,
            reference,
            calc,
        } => cmd_pay(
            &cfg_dir,
            invoice,
            amount,
            method,
            reference,
            calc,
            confirmer.as_ref(),
        ),
        Commands::Void { invoice, reason } => {
            cmd_void(&cfg_dir, invoice, reason, confirmer.as_ref())
        }
        Commands::Methods => cmd_methods(),
    }
}

/// Initialize config directory with a template file
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(CajaError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized caja config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point base_url at the backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Check connectivity:             caja status");
    println!();
    println!("Then register your first payment:");
    println!("  caja pay <invoice> --method efectivo");

    Ok(())
}

/// Show config and backend connectivity
fn cmd_status(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(CajaError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.backend);

    println!("Caja Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Backend:          {}", config.backend.base_url);
    println!("Timeout:          {}s", config.backend.timeout_secs);
    println!("Currency:         {}", config.ui.currency_symbol);
    println!(
        "Connection:       {}",
        if client.ping() { "ok" } else { "unreachable" }
    );

    Ok(())
}

/// Show an invoice's totals, balance, and available actions
fn cmd_show(cfg_dir: &PathBuf, invoice: u64) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(CajaError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.backend);
    let snapshot = client.fetch_invoice(invoice)?.snapshot();
    let symbol = &config.ui.currency_symbol;

    let paid = round_money(snapshot.total - snapshot.saldo);

    println!("Invoice {invoice}");
    println!("{}", "-".repeat(50));
    println!("Total:       {symbol}{:.2}", snapshot.total);
    println!("Paid:        {symbol}{:.2}", paid);
    println!("Outstanding: {symbol}{:.2}", snapshot.saldo);
    println!("State:       {}", snapshot.state_label());
    println!(
        "Fetched:     {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    // Settled or void invoices get no action hints
    if snapshot.saldo > 0.0 && !snapshot.is_void() {
        println!();
        println!("Actions: pay [--amount <a>] --method <m> | void [--reason <text>]");
    }

    Ok(())
}

/// Register a payment against an invoice
fn cmd_pay(
    cfg_dir: &PathBuf,
    invoice: u64,
    amount: Option<String>,
    method: PaymentMethod,
    reference: Option<String>,
    use_calc: bool,
    confirmer: &dyn Confirmer,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(CajaError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.backend);
    let meta = client.fetch_invoice(invoice)?;
    let snapshot = meta.snapshot();
    let symbol = config.ui.currency_symbol.clone();

    if snapshot.is_void() {
        notify::warning(&format!("Invoice {invoice} is void. No payment accepted."));
        return Ok(());
    }

    let amount = if use_calc {
        match run_calculator(snapshot.saldo, &symbol)? {
            Some(composed) => Some(composed),
            None => {
                notify::info("Amount entry cancelled.");
                return Ok(());
            }
        }
    } else {
        amount
    };

    let intent = match amount {
        None => match plan_full_payment(&snapshot, method, reference) {
            FullPaymentPlan::Payable(intent) => intent,
            FullPaymentPlan::NothingOutstanding => {
                notify::warning(&format!(
                    "Invoice {invoice} has no outstanding balance. Nothing to pay."
                ));
                return Ok(());
            }
        },
        Some(raw) => match plan_partial_payment(&snapshot, &raw, method, reference)? {
            PartialPaymentPlan::Payable { intent, clamped } => {
                if clamped {
                    notify::warning(&format!(
                        "Amount adjusted to the maximum outstanding {symbol}{:.2}",
                        intent.amount
                    ));
                }
                intent
            }
            PartialPaymentPlan::NothingOutstanding => {
                notify::warning(&format!(
                    "Invoice {invoice} has no outstanding balance. Nothing to pay."
                ));
                return Ok(());
            }
        },
    };

    let kind = if intent.es_parcial { "partial" } else { "full" };
    let prompt = format!(
        "Register a {kind} payment of {symbol}{:.2} for invoice {invoice} via {}?",
        intent.amount,
        intent.metodo_pago.label()
    );
    if !confirmer.confirm("Register payment", &prompt)? {
        notify::info("Payment cancelled. Nothing was sent.");
        return Ok(());
    }

    notify::info("Submitting payment...");
    let token = meta.csrf_token.as_deref().or(config.backend.token.as_deref());
    let response = client.submit_payment(invoice, &intent, token)?;

    if !response.success {
        return Err(CajaError::Backend(response.message));
    }

    notify::success(&response.message);
    report_refreshed_state(&client, invoice, response.redirect.as_deref(), &symbol);

    Ok(())
}

/// Void an invoice (irreversible, double confirmation)
fn cmd_void(
    cfg_dir: &PathBuf,
    invoice: u64,
    reason: Option<String>,
    confirmer: &dyn Confirmer,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(CajaError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.backend);
    let meta = client.fetch_invoice(invoice)?;
    let symbol = config.ui.currency_symbol.clone();

    let intent = VoidIntent::new(reason.as_deref());

    let first = match &intent.motivo {
        Some(motivo) => format!("Void invoice {invoice}? Reason: {motivo}"),
        None => format!("Void invoice {invoice}?"),
    };
    if !confirmer.confirm("Void invoice", &first)? {
        notify::info("Void cancelled. Nothing was sent.");
        return Ok(());
    }

    let second = format!("This action cannot be undone. Really void invoice {invoice}?");
    if !confirmer.confirm("Void invoice", &second)? {
        notify::info("Void cancelled. Nothing was sent.");
        return Ok(());
    }

    notify::info("Submitting void request...");
    let token = meta.csrf_token.as_deref().or(config.backend.token.as_deref());
    let response = client.void_invoice(invoice, &intent, token)?;

    if !response.success {
        return Err(CajaError::Backend(response.message));
    }

    notify::success(&response.message);
    report_refreshed_state(&client, invoice, response.redirect.as_deref(), &symbol);

    Ok(())
}

// Table row struct for tabled
#[derive(Tabled)]
struct MethodRow {
    #[tabled(rename = "VALUE")]
    value: &'static str,
    #[tabled(rename = "LABEL")]
    label: &'static str,
}

/// List accepted payment methods
fn cmd_methods() -> Result<()> {
    let rows: Vec<MethodRow> = PaymentMethod::ALL
        .iter()
        .map(|m| MethodRow {
            value: m.wire(),
            label: m.label(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Re-read server state after a successful mutation and print the fresh
/// balance. Best-effort: the mutation already succeeded, so a failed reload
/// only suppresses the summary lines.
fn report_refreshed_state(client: &ApiClient, invoice: u64, redirect: Option<&str>, symbol: &str) {
    if let Some(meta) = client.refresh(redirect, invoice) {
        let snapshot = meta.snapshot();
        println!("  Outstanding: {symbol}{:.2}", snapshot.saldo);
        println!("  State:       {}", snapshot.state_label());
    }
}

/// Interactive amount entry. Returns the composed amount as a string (fed
/// through the same validation as --amount), or None when cancelled.
fn run_calculator(balance: f64, symbol: &str) -> Result<Option<String>> {
    let mut calc = Calculator::new(balance);

    println!("Amount entry (max {symbol}{balance:.2})");
    println!("  digits/'.' append   c clear   b backspace   m max");
    println!("  +5 +10 +20 +50 quick add   a apply   q cancel");

    let stdin = io::stdin();
    loop {
        print!("[{}] > ", calc.display());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim() {
            "a" => return Ok(Some(format!("{:.2}", calc.apply()))),
            "q" => return Ok(None),
            "c" => calc.clear(),
            "b" => calc.backspace(),
            "m" => calc.set_max(),
            "+5" => calc.quick_add(5.0),
            "+10" => calc.quick_add(10.0),
            "+20" => calc.quick_add(20.0),
            "+50" => calc.quick_add(50.0),
            other => {
                for ch in other.chars() {
                    calc.push_digit(ch);
                }
            }
        }
    }
}
