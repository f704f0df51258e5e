use crate::error::{Result, WalletError};
use crate::interfaces::request::PointRequest;
use std::io::Read;

/// Streams charge and use requests out of a CSV file.
///
/// Expects a `type, user, amount` header. Fields are trimmed and short rows
/// are accepted so that a missing amount surfaces as a per-row error.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one result per data row; a bad row does not stop the stream.
    pub fn requests(self) -> impl Iterator<Item = Result<PointRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(WalletError::from))
    }
}
