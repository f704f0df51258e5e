//! CSV request input and report output for the batch CLI.

pub mod report_writer;
pub mod request_reader;
