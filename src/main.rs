//! # Bank-ledger
//! Interactive text menu over an in-memory [`Ledger`]. Commands and their fields are read from
//! stdin one line at a time, statements and account listings are printed as csv.
//!
//! ## Environment
//! - `LEDGER_WITHDRAWAL_LIMIT` maximum amount of single withdrawal (default `500`)
//! - `LEDGER_WITHDRAWAL_CAP` maximum number of withdrawals per account (default `3`)
//! - `RUST_LOG` log filter, logs go to stderr

#![deny(missing_docs)]

use anyhow::Context;
use bank_ledger::{account::Account, config::LedgerConfig, csv, ledger::Ledger, AccountNumber};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MENU: &str = "
================ MENU ================
[d]  deposit
[s]  withdraw
[e]  statement
[nc] new account
[lc] list accounts
[nu] new customer
[q]  quit
=> ";

const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

struct Menu<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    async fn say(&mut self, msg: impl AsRef<str>) -> anyhow::Result<()> {
        self.out.write_all(msg.as_ref().as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    /// print `prompt` and read answer. End of input gives empty answer
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.say(prompt).await?;
        let line = self.lines.next_line().await.context("read stdin")?;
        Ok(line.unwrap_or_default().trim().to_owned())
    }

    async fn run(&mut self, ledger: &mut Ledger) -> anyhow::Result<()> {
        loop {
            self.say(MENU).await?;
            let Some(option) = self.lines.next_line().await.context("read stdin")? else {
                break;
            };

            match option.trim() {
                "d" => self.deposit(ledger).await?,
                "s" => self.withdraw(ledger).await?,
                "e" => self.statement(ledger).await?,
                "nc" => self.new_account(ledger).await?,
                "lc" => self.list_accounts(ledger).await?,
                "nu" => self.new_customer(ledger).await?,
                "q" => break,
                _ => self.say("\ninvalid option\n").await?,
            }
        }
        Ok(())
    }

    /// ask for tax id and account number, `None` when any of them is unknown
    async fn ask_account(
        &mut self,
        ledger: &Ledger,
    ) -> anyhow::Result<Option<(String, AccountNumber)>> {
        let tax_id = self.ask("customer tax id: ").await?;
        let customer = match ledger.find_customer(&tax_id) {
            Ok(c) => c,
            Err(e) => {
                self.say(format!("\n{e}\n")).await?;
                return Ok(None);
            }
        };

        let raw = self.ask("account number: ").await?;
        let Ok(number) = raw.parse::<AccountNumber>() else {
            self.say(format!("\ninvalid account number: {raw}\n")).await?;
            return Ok(None);
        };

        if let Err(e) = ledger.find_account(customer, number) {
            self.say(format!("\n{e}\n")).await?;
            return Ok(None);
        }
        Ok(Some((tax_id, number)))
    }

    async fn ask_amount(&mut self, prompt: &str) -> anyhow::Result<Option<Decimal>> {
        let raw = self.ask(prompt).await?;
        match Decimal::from_str(&raw) {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                self.say(format!("\ninvalid amount: {raw}\n")).await?;
                Ok(None)
            }
        }
    }

    async fn deposit(&mut self, ledger: &mut Ledger) -> anyhow::Result<()> {
        let Some((tax_id, number)) = self.ask_account(ledger).await? else {
            return Ok(());
        };
        let Some(amount) = self.ask_amount("amount to deposit: ").await? else {
            return Ok(());
        };

        match ledger.deposit(&tax_id, number, amount) {
            Ok(()) => self.say("\ndeposit done\n").await,
            Err(e) => self.say(format!("\n{e}\n")).await,
        }
    }

    async fn withdraw(&mut self, ledger: &mut Ledger) -> anyhow::Result<()> {
        let Some((tax_id, number)) = self.ask_account(ledger).await? else {
            return Ok(());
        };
        let Some(amount) = self.ask_amount("amount to withdraw: ").await? else {
            return Ok(());
        };

        match ledger.withdraw(&tax_id, number, amount) {
            Ok(()) => self.say("\nwithdrawal done\n").await,
            Err(e) => self.say(format!("\n{e}\n")).await,
        }
    }

    async fn statement(&mut self, ledger: &Ledger) -> anyhow::Result<()> {
        let Some((tax_id, number)) = self.ask_account(ledger).await? else {
            return Ok(());
        };
        let statement = ledger
            .statement(&tax_id, number)
            .context("account checked before")?;

        self.say("\n================ STATEMENT ================\n").await?;
        if statement.records.is_empty() {
            self.say("no transactions were made\n").await?;
        } else {
            csv::write_statement(&statement, &mut self.out).await?;
        }
        self.say(format!(
            "==========================================\nbalance: {:.2}\n",
            statement.balance
        ))
        .await
    }

    async fn new_account(&mut self, ledger: &mut Ledger) -> anyhow::Result<()> {
        let tax_id = self.ask("customer tax id: ").await?;
        match ledger.open_account(&tax_id) {
            Ok(acc) => {
                let msg = format!("\naccount {} created\n", acc.number());
                self.say(msg).await
            }
            Err(e) => self.say(format!("\n{e}\n")).await,
        }
    }

    async fn list_accounts(&mut self, ledger: &Ledger) -> anyhow::Result<()> {
        let accounts = ledger.list_accounts();
        if accounts.is_empty() {
            return self.say("\nno accounts\n").await;
        }

        self.say("\n").await?;
        csv::write_account_list(tokio_stream::iter(accounts), &mut self.out).await
    }

    async fn new_customer(&mut self, ledger: &mut Ledger) -> anyhow::Result<()> {
        let tax_id = self.ask("tax id: ").await?;
        if ledger.find_customer(&tax_id).is_ok() {
            return self.say(format!("\ntax id {tax_id} already registered\n")).await;
        }

        let full_name = self.ask("full name: ").await?;
        let address = self.ask("address (street, nr - district - city/state): ").await?;
        let raw = self.ask("birth date (dd/mm/yyyy): ").await?;
        let Ok(birth_date) = NaiveDate::parse_from_str(&raw, BIRTH_DATE_FORMAT) else {
            return self.say(format!("\ninvalid date: {raw}\n")).await;
        };

        match ledger.register_customer(full_name, address, tax_id, birth_date) {
            Ok(_) => self.say("\ncustomer registered\n").await,
            Err(e) => self.say(format!("\n{e}\n")).await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs on stderr, stdout belongs to menu
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = LedgerConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "starting ledger");
    let mut ledger = Ledger::new(config);

    let mut menu = Menu::new(BufReader::new(stdin()), stdout());
    menu.run(&mut ledger).await
}
