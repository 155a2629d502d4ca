//! Rosetta console example - exercises the Rosetta API client end to end.
//!
//! Configuration comes from `~/.config/rosetta-client/config.json`, a `.env`
//! file, and `ROSETTA_*` environment variables (in increasing priority).

use std::io;

use anyhow::{Context, Result};
use rosetta_core::{
    AccountQuery, CredentialStore, IdentityQuery, PeopleQuery, RosettaClient, RosettaClientOptions,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Email used by the people search demo unless overridden.
const DEFAULT_DEMO_EMAIL: &str = "email-address@ucdavis.edu";

/// IAM ID used by the accounts demo unless overridden.
const DEFAULT_DEMO_IAM_ID: &str = "1234567890";

/// Number of identities requested by the identities demo.
const DEMO_IDENTITY_LIMIT: u32 = 10;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=rosetta_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--store-secret" {
        return store_secret(args.get(2));
    }
    if args.len() > 1 && args[1] == "--forget-secret" {
        return forget_secret(args.get(2));
    }

    let mut options = RosettaClientOptions::load().context("Failed to load configuration")?;
    if let Some(pos) = args.iter().position(|a| a == "--debug-response") {
        let max_length = args
            .get(pos + 1)
            .context("--debug-response needs a length (0 off, -1 unlimited)")?
            .parse()
            .context("--debug-response length must be an integer")?;
        options.debug_response_max_length = max_length;
    }

    println!("UC Davis Rosetta API Client Example");
    println!("====================================\n");

    let client = RosettaClient::new(options).context("Failed to create Rosetta client")?;
    info!(base_url = %client.base_url(), "Rosetta client ready");

    if let Err(e) = run_examples(&client).await {
        println!("❌ Error: {:#}", e);
        println!(
            "\nNote: this example requires valid credentials and network access \
             to the Rosetta API."
        );
        println!(
            "Set ROSETTA_BASE_URL, ROSETTA_TOKEN_URL, ROSETTA_CLIENT_ID and \
             ROSETTA_CLIENT_SECRET."
        );
    }

    Ok(())
}

async fn run_examples(client: &RosettaClient) -> Result<()> {
    let email =
        std::env::var("ROSETTA_DEMO_EMAIL").unwrap_or_else(|_| DEFAULT_DEMO_EMAIL.to_string());
    let iam_id =
        std::env::var("ROSETTA_DEMO_IAMID").unwrap_or_else(|_| DEFAULT_DEMO_IAM_ID.to_string());

    section("Example 1: Get information about the authenticated client");
    let me = client.fetch_me().await.context("me")?;
    println!(
        "✓ Successfully retrieved client information ({})\n",
        me.client_id.as_deref().unwrap_or("unknown client")
    );

    section("Example 2: Search for a person by email");
    let people = client
        .fetch_people(&PeopleQuery::by_email(&email))
        .await
        .context("people")?;
    println!("✓ Found {} person/people\n", people.len());

    section("Example 3: Get accounts for a specific IAM ID");
    let accounts = client
        .fetch_accounts(&AccountQuery::by_iam_id(&iam_id))
        .await
        .context("accounts")?;
    println!("✓ Found {} account(s)\n", accounts.len());

    section("Example 4: Get recently modified identities");
    let identities = client
        .fetch_identities(&IdentityQuery::with_limit(DEMO_IDENTITY_LIMIT))
        .await
        .context("identities")?;
    println!("✓ Retrieved {} identities\n", identities.len());

    section("Example 5: Get all groups");
    let groups = client.fetch_groups().await.context("groups")?;
    println!("✓ Retrieved {} groups\n", groups.len());

    println!("✓ All examples completed successfully!");
    Ok(())
}

fn section(title: &str) {
    println!("{}", title);
    println!("{}", "-".repeat(title.chars().count()));
}

/// Prompt for a client secret and keep it in the OS keychain
fn store_secret(client_id: Option<&String>) -> Result<()> {
    let client_id = client_id.context("usage: rosetta --store-secret <client-id>")?;
    let secret = rpassword::prompt_password(format!("Client secret for {}: ", client_id))
        .context("Failed to read client secret")?;
    CredentialStore::store_secret(client_id, secret.trim())?;
    println!("✓ Stored client secret for {}", client_id);
    Ok(())
}

fn forget_secret(client_id: Option<&String>) -> Result<()> {
    let client_id = client_id.context("usage: rosetta --forget-secret <client-id>")?;
    CredentialStore::delete_secret(client_id)?;
    println!("✓ Removed client secret for {}", client_id);
    Ok(())
}
