// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

/// Ten years of days.
pub const MAX_TREND_DAYS: i64 = 3660;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn crud(name: &'static str, about: &'static str, add: Command, edit: Command) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(add)
        .subcommand(json_flags(Command::new("list").about("List records")))
        .subcommand(edit.arg(id_arg()))
        .subcommand(Command::new("rm").about("Remove a record").arg(id_arg()))
}

fn tx_cmd() -> Command {
    let add = Command::new("add")
        .about("Record a transaction")
        .arg(req("date", "YYYY-MM-DD"))
        .arg(req("description", "What it was"))
        .arg(req("amount", "Positive amount"))
        .arg(req("type", "income|expense"))
        .arg(req("category", "Category name or id"))
        .arg(opt("account", "Account name or id"))
        .arg(opt("contact", "Client (income) or vendor (expense) name or id"))
        .arg(opt("status", "completed|pending|overdue").default_value("completed"))
        .arg(opt("notes", "Free text"))
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .action(ArgAction::SetTrue),
        );
    let edit = Command::new("edit")
        .about("Change fields of a transaction")
        .arg(opt("date", "YYYY-MM-DD"))
        .arg(opt("description", "What it was"))
        .arg(opt("amount", "Positive amount"))
        .arg(opt("type", "income|expense"))
        .arg(opt("category", "Category name or id"))
        .arg(opt("account", "Account name or id"))
        .arg(opt("contact", "Client or vendor name or id"))
        .arg(opt("status", "completed|pending|overdue"))
        .arg(opt("notes", "Free text"))
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .value_parser(value_parser!(bool)),
        );
    let list = json_flags(
        Command::new("list")
            .about("List transactions, newest first")
            .arg(opt("month", "YYYY-MM"))
            .arg(opt("type", "income|expense"))
            .arg(opt("status", "completed|pending|overdue"))
            .arg(opt("category", "Category name or id"))
            .arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
    );
    Command::new("tx")
        .about("Transactions")
        .subcommand_required(true)
        .subcommand(add)
        .subcommand(list)
        .subcommand(edit.arg(id_arg()))
        .subcommand(Command::new("rm").about("Remove a transaction").arg(id_arg()))
}

fn category_cmd() -> Command {
    crud(
        "category",
        "Income and expense categories",
        Command::new("add")
            .about("Add a category")
            .arg(req("name", "Display name"))
            .arg(req("type", "income|expense"))
            .arg(opt("color", "Hex color").default_value("#3b82f6"))
            .arg(opt("icon", "Emoji or short label")),
        Command::new("edit")
            .about("Change a category")
            .arg(opt("name", "Display name"))
            .arg(opt("type", "income|expense"))
            .arg(opt("color", "Hex color"))
            .arg(opt("icon", "Emoji or short label")),
    )
}

fn account_cmd() -> Command {
    crud(
        "account",
        "Bank, credit and investment accounts",
        Command::new("add")
            .about("Add an account")
            .arg(req("name", "Display name"))
            .arg(req("type", "checking|savings|credit|investment"))
            .arg(opt("balance", "Current balance").default_value("0"))
            .arg(opt("institution", "Bank or broker"))
            .arg(opt("threshold", "Warn below this balance")),
        Command::new("edit")
            .about("Change an account")
            .arg(opt("name", "Display name"))
            .arg(opt("type", "checking|savings|credit|investment"))
            .arg(opt("balance", "Current balance"))
            .arg(opt("institution", "Bank or broker"))
            .arg(opt("threshold", "Warn below this balance")),
    )
}

fn contact_args(cmd: Command, total: &'static str, extra: &'static str) -> Command {
    cmd.arg(opt("email", "Email address"))
        .arg(opt("phone", "Phone number"))
        .arg(opt("address", "Postal address"))
        .arg(opt(extra, "Terms or default category"))
        .arg(opt(total, "Running total"))
        .arg(opt("status", "active|inactive"))
}

fn client_cmd() -> Command {
    crud(
        "client",
        "Clients who pay you",
        contact_args(
            Command::new("add")
                .about("Add a client")
                .arg(req("name", "Display name")),
            "total-paid",
            "terms",
        ),
        contact_args(
            Command::new("edit")
                .about("Change a client")
                .arg(opt("name", "Display name")),
            "total-paid",
            "terms",
        ),
    )
}

fn vendor_cmd() -> Command {
    crud(
        "vendor",
        "Vendors you pay",
        contact_args(
            Command::new("add")
                .about("Add a vendor")
                .arg(req("name", "Display name")),
            "total-spent",
            "category",
        ),
        contact_args(
            Command::new("edit")
                .about("Change a vendor")
                .arg(opt("name", "Display name")),
            "total-spent",
            "category",
        ),
    )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly budgets per category")
        .subcommand_required(true)
        .subcommand(
            Command::new("set")
                .about("Create or change the budget of a category")
                .arg(req("category", "Category name or id"))
                .arg(req("amount", "Monthly amount")),
        )
        .subcommand(json_flags(Command::new("list").about("List budgets")))
        .subcommand(
            Command::new("rm")
                .about("Remove the budget of a category")
                .arg(req("category", "Category name or id")),
        )
        .subcommand(json_flags(
            Command::new("status")
                .about("Spending against each budget")
                .arg(opt("month", "Only count this YYYY-MM"))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Count pending and overdue transactions too"),
                ),
        ))
}

fn report_cmd() -> Command {
    let all = || {
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .help("Count pending and overdue transactions too")
    };
    Command::new("report")
        .about("Dashboard figures")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("summary").about("Income, expenses, balance and counts"),
        ))
        .subcommand(json_flags(
            Command::new("categories")
                .about("Top expense categories")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .default_value("5")
                        .value_parser(value_parser!(usize)),
                )
                .arg(all()),
        ))
        .subcommand(json_flags(
            Command::new("daily")
                .about("Income and expense per day")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u16).range(1..=MAX_TREND_DAYS))
                        .help("Length of the series, 30 when omitted"),
                )
                .arg(all()),
        ))
        .subcommand(json_flags(
            Command::new("monthly")
                .about("Spending per month")
                .arg(all()),
        ))
}

pub fn build_cli() -> Command {
    Command::new("moneyflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track income, expenses, budgets, clients and vendors")
        .arg(
            Arg::new("db")
                .long("db")
                .env("MONEYFLOW_DB")
                .global(true)
                .help("Path of the SQLite file holding local data"),
        )
        .arg(
            Arg::new("remote")
                .long("remote")
                .env("MONEYFLOW_API_URL")
                .global(true)
                .help("Use the REST backend at this base URL instead of local data"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Reject duplicate budgets and dangling references"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(tx_cmd())
        .subcommand(category_cmd())
        .subcommand(account_cmd())
        .subcommand(client_cmd())
        .subcommand(vendor_cmd())
        .subcommand(budget_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("json")
                        .about("Every collection as one JSON document")
                        .arg(req("out", "Output path")),
                )
                .subcommand(
                    Command::new("csv")
                        .about("Transactions as CSV")
                        .arg(req("out", "Output path")),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Load data from a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("json")
                        .about("Replace the collections found in an export document")
                        .arg(req("path", "Input path")),
                ),
        )
        .subcommand(
            Command::new("prefs")
                .about("Display preferences")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show").about("Show preferences")))
                .subcommand(
                    Command::new("set")
                        .about("Change preferences")
                        .arg(opt("theme", "blue|purple|green"))
                        .arg(opt("currency", "Currency code, e.g. EUR"))
                        .arg(
                            Arg::new("dark")
                                .long("dark")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all activity and restore default categories and accounts")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .required(true),
                ),
        )
        .subcommand(Command::new("doctor").about("Report broken references and duplicates"))
}
