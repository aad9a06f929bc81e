// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Record, list, edit and delete transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction (amount in the display currency)")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .default_value("expense"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, optionally filtered and sorted")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Regular expression matched against description, category, date and amount"),
                )
                .arg(
                    Arg::new("case_sensitive")
                        .long("case-sensitive")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["date", "description", "category", "type", "id", "amount"])
                        .default_value("date"),
                )
                .arg(Arg::new("desc").long("desc").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("highlight")
                        .long("highlight")
                        .action(ArgAction::SetTrue)
                        .help("Wrap matches in <mark> (HTML-escaped output)"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit fields of a transaction (amount in the display currency)")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

fn settings_command() -> Command {
    Command::new("settings")
        .about("Spending cap, display currency and theme")
        .subcommand_required(true)
        .subcommand(json_flags(Command::new("show")))
        .subcommand(
            Command::new("cap")
                .about("Set the monthly spending cap (display currency, 0 disables)")
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            Command::new("currency")
                .about("Select the display currency and its rates")
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .value_parser(["USD", "KSH", "RWF"])
                        .ignore_case(true),
                )
                .arg(Arg::new("ksh_rate").long("ksh-rate"))
                .arg(Arg::new("rwf_rate").long("rwf-rate")),
        )
        .subcommand(
            Command::new("theme").arg(
                Arg::new("theme")
                    .long("theme")
                    .value_parser(["light", "dark"])
                    .required(true),
            ),
        )
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(clap::crate_version!())
        .about("Personal income/expense ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path of the ledger database (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the ledger store"))
        .subcommand(tx_command())
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Monthly totals, savings rate and cap progress")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month"))
                .arg(
                    Arg::new("back")
                        .long("back")
                        .value_parser(value_parser!(u32))
                        .conflicts_with("month")
                        .help("Show the month this many months before the current one"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("chart")
                .about("Expenses for each of the last days")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u64).range(1..=366))
                        .default_value("7"),
                ),
        ))
        .subcommand(settings_command())
        .subcommand(
            Command::new("export")
                .about("Write all transactions to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json|csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all transactions with the contents of a JSON backup")
                .arg(Arg::new("path").long("path").required(true)),
        )
}
