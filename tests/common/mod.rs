use std::io::Error;
use std::path::Path;

/// Writes `rounds` charges of `amount` for each of `users` users, interleaved by user.
pub fn generate_requests_csv(
    path: &Path,
    users: u64,
    rounds: usize,
    amount: u64,
) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(["type", "user", "amount"])?;

    for _ in 0..rounds {
        for user in 1..=users {
            wtr.write_record(["charge", &user.to_string(), &amount.to_string()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
