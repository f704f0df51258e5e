use crate::domain::history::{PointHistory, TransactionKind};
use crate::domain::point::{UserId, UserPoint};
use crate::error::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// Format of the balance report printed after a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Serialize)]
struct BalanceRow {
    user: UserId,
    point: u64,
}

#[derive(Serialize)]
struct HistoryRow {
    id: u64,
    user: UserId,
    r#type: TransactionKind,
    amount: u64,
    occurred_at: String,
}

/// Writes balance and history reports to any `Write` sink.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one row per user: `user,point` as CSV, or the full records as JSON.
    pub fn write_balances(&mut self, balances: &[UserPoint], format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(&mut self.writer);
                for balance in balances {
                    wtr.serialize(BalanceRow {
                        user: balance.user_id,
                        point: balance.point,
                    })?;
                }
                wtr.flush()?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, balances)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// Writes history as CSV `id,user,type,amount,occurred_at`.
    pub fn write_history(&mut self, entries: &[PointHistory]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        for entry in entries {
            wtr.serialize(HistoryRow {
                id: entry.id,
                user: entry.user_id,
                r#type: entry.kind,
                amount: entry.amount.value(),
                occurred_at: entry.occurred_at.to_rfc3339(),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point::Amount;
    use chrono::Utc;

    #[test]
    fn test_write_balances_csv() {
        let balances = vec![UserPoint::new(1, 150), UserPoint::new(2, 0)];
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_balances(&balances, OutputFormat::Csv).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "user,point\n1,150\n2,0\n");
    }

    #[test]
    fn test_write_balances_json() {
        let balances = vec![UserPoint::new(1, 150)];
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_balances(&balances, OutputFormat::Json).unwrap();

        let output = writer.into_inner();
        let parsed: Vec<UserPoint> = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, balances);
    }

    #[test]
    fn test_write_history_csv() {
        let entries = vec![PointHistory {
            id: 1,
            user_id: 4,
            amount: Amount::new(25).unwrap(),
            kind: TransactionKind::Use,
            occurred_at: Utc::now(),
        }];
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_history(&entries).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("id,user,type,amount,occurred_at"));
        assert!(lines.next().unwrap().starts_with("1,4,USE,25,"));
    }
}
