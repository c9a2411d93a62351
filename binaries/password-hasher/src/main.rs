//! Prints a bcrypt hash for seeding test and development accounts.

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{Level, info};

const DEV_CREDENTIAL: &str = "admin123";
const DEFAULT_COST: u32 = 10;

#[derive(Parser)]
#[command(name = "password-hasher")]
#[command(about = "Generate a bcrypt hash for a development credential")]
struct Cli {
    /// Credential to hash; defaults to the development one
    password: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_COST)]
    cost: u32,
}

/// Hashes `password` and checks the result verifies against it.
fn hash_and_verify(password: &str, cost: u32) -> Result<String> {
    let hash = bcrypt::hash(password, cost)?;

    if !bcrypt::verify(password, &hash)? {
        bail!("generated hash does not verify against its input");
    }

    Ok(hash)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let password = cli.password.as_deref().unwrap_or(DEV_CREDENTIAL);

    let hash = hash_and_verify(password, cli.cost)?;
    info!(cost = cli.cost, "hash verified");
    println!("{hash}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_hash_verifies() {
        let hash = hash_and_verify(DEV_CREDENTIAL, 4).unwrap();

        assert!(hash.starts_with("$2"));
        assert!(bcrypt::verify(DEV_CREDENTIAL, &hash).unwrap());
        assert!(!bcrypt::verify("admin124", &hash).unwrap());
    }

    #[test]
    fn test_default_cost_is_ten() {
        let cli = Cli::parse_from(["password-hasher"]);

        assert_eq!(cli.cost, 10);
        assert!(cli.password.is_none());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(hash_and_verify(DEV_CREDENTIAL, 2).is_err());
    }
}
