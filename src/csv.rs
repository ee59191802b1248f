//! csv output format and functions

use csv_async::{AsyncWriterBuilder, Terminator};

use crate::{
    account::{Account, HistoryRecord, TransactionKind},
    ledger::Statement,
    AccountNumber,
};
use serde::{Deserialize, Serialize};

use tokio::io::AsyncWrite;
use tokio_stream::{Stream, StreamExt};

/// format of history timestamps
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// one line of printed statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct StatementRow {
    pub kind: TransactionKind,
    pub amount: String,
    pub timestamp: String,
}

impl From<&HistoryRecord> for StatementRow {
    fn from(rec: &HistoryRecord) -> Self {
        Self {
            kind: rec.kind,
            amount: format!("{:.2}", rec.amount),
            timestamp: rec.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// summary of account identity and owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccountSummary {
    pub branch: String,
    pub number: AccountNumber,
    pub owner: String,
}

impl AccountSummary {
    /// summary of `acc` owned by customer called `owner`
    pub fn new(acc: &impl Account, owner: &str) -> Self {
        Self {
            branch: acc.branch().to_owned(),
            number: acc.number(),
            owner: owner.to_owned(),
        }
    }
}

fn writer_builder() -> AsyncWriterBuilder {
    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);
    builder
}

/// save `statement` history as [`StatementRow`]s into `wr`. Headers are written together with
/// the first row, empty history writes nothing.
pub async fn write_statement(
    statement: &Statement,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut wr = writer_builder().create_serializer(wr);

    for rec in &statement.records {
        wr.serialize(StatementRow::from(rec)).await?;
    }

    wr.flush().await?;
    Ok(())
}

/// read items from `in_stream` and save them into `wr`. Headers will be included automatically.
/// Terminator is `\r\n`
pub async fn write_account_list(
    in_stream: impl Stream<Item = AccountSummary> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut wr = writer_builder().create_serializer(wr);

    while let Some(summary) = in_stream.next().await {
        wr.serialize(summary).await?;
    }

    wr.flush().await?;
    Ok(())
}
