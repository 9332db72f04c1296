use std::process::ExitCode;

use clap::Parser;
use hash_gen::{
    Credential, DEFAULT_COST, demo_credentials, hash_credentials, render_seed_sql, self_check,
};

/// Generate bcrypt hashes for seeding the users table, then verify each one.
///
/// - `--user name:password` may be repeated; without it the demo users are used
/// - Prints an INSERT statement, then a verification report
/// - Exits non-zero if any hash fails to verify
#[derive(Parser, Debug)]
#[command(name = "hash-gen", version, about)]
struct Args {
    /// Credential as name:password (repeatable)
    #[arg(long = "user", value_name = "NAME:PASSWORD", value_parser = Credential::parse)]
    users: Vec<Credential>,

    /// bcrypt work factor (4..=31)
    #[arg(long, default_value_t = DEFAULT_COST)]
    cost: u32,

    /// Print only the INSERT statement (no report)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let credentials = if args.users.is_empty() {
        demo_credentials()
    } else {
        args.users
    };

    let hashed = hash_credentials(&credentials, args.cost)?;

    if args.quiet {
        print!("{}", render_seed_sql(&hashed));
        return Ok(ExitCode::SUCCESS);
    }

    println!("-- bcrypt hashes (cost factor: {})", args.cost);
    for c in &credentials {
        println!("--   {}", c.identifier);
    }
    print!("{}", render_seed_sql(&hashed));

    println!();
    println!("Verification:");
    let outcomes = self_check(&credentials, &hashed);
    for o in &outcomes {
        let status = if o.verified { "ok" } else { "FAILED" };
        println!("  [{}] {}", status, o.identifier);
    }

    if outcomes.iter().all(|o| o.verified) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
