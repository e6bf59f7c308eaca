//! Prints an Argon2id PHC hash for seeding `admin_users.password_hash`.
//!
//! ```text
//! cargo run -p api --bin hash-password -- 'la contraseña'
//! ```
//! Without an argument the password is read from the first line of stdin.

use std::io::BufRead;

use anyhow::{Context, bail};
use platform::password::ClearTextPassword;

fn main() -> anyhow::Result<()> {
    let raw = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if raw.is_empty() {
        bail!("usage: hash-password <password>");
    }

    let password = ClearTextPassword::new(raw).context("password rejected")?;
    let hash = password.hash().context("hashing failed")?;
    println!("{}", hash.as_str());
    Ok(())
}
