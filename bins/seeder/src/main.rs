//! Database seeder for Krona development and testing.
//!
//! Seeds a handful of demo clients with accounts in known lifecycle states
//! so a freshly migrated database has data to serve.
//!
//! Usage: cargo run --bin seeder

use sea_orm::DatabaseConnection;

use krona_core::account::{AccountType, NewAccount};
use krona_core::client::NewClient;
use krona_db::{AccountRepository, ClientRepository};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = krona_db::connect(&database_url, 5, 1)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo clients...");
    seed_demo_clients(&db).await;

    println!("Seeding a closed account...");
    seed_closed_account(&db).await;

    println!("Seeding complete!");
}

/// Seeds demo clients, each with zero or more open accounts.
async fn seed_demo_clients(db: &DatabaseConnection) {
    let clients = ClientRepository::new(db.clone());
    let accounts = AccountRepository::new(db.clone());

    let demo = [
        (
            "James Bond",
            "james.bond@krona.dev",
            "+12025550107",
            vec![AccountType::Debit, AccountType::Savings],
        ),
        (
            "Clara Oswald",
            "clara.oswald@krona.dev",
            "+12025550123",
            vec![AccountType::Credit],
        ),
        ("Erik Larsson", "erik.larsson@krona.dev", "+46701234567", vec![]),
    ];

    for (name, email, phone, account_types) in demo {
        // Check if the client already exists
        match clients.email_exists(email).await {
            Ok(true) => {
                println!("  Client {email} already exists, skipping...");
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("Failed to check for existing client {email}: {e}");
                continue;
            }
        }

        let client = match clients.create(NewClient::new(name, email, phone)).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to insert client {email}: {e}");
                continue;
            }
        };
        println!("  Created client: {} ({})", client.name, client.email);

        for account_type in account_types {
            match accounts
                .create(NewAccount::open(client.id, account_type))
                .await
            {
                Ok(account) => println!(
                    "    Opened {} account {}",
                    account_type.as_str(),
                    account.account_number
                ),
                Err(e) => eprintln!("Failed to open account for {email}: {e}"),
            }
        }
    }
}

/// Seeds a client holding one already-closed account.
async fn seed_closed_account(db: &DatabaseConnection) {
    let clients = ClientRepository::new(db.clone());
    let accounts = AccountRepository::new(db.clone());

    let email = "nora.quist@krona.dev";
    match clients.email_exists(email).await {
        Ok(true) => {
            println!("  Client {email} already exists, skipping...");
            return;
        }
        Ok(false) => {}
        Err(e) => {
            eprintln!("Failed to check for existing client {email}: {e}");
            return;
        }
    }

    let client = match clients
        .create(NewClient::new("Nora Quist", email, "+46735550199"))
        .await
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to insert client {email}: {e}");
            return;
        }
    };

    let account = match accounts
        .create(NewAccount::open(client.id, AccountType::Savings))
        .await
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to open account for {email}: {e}");
            return;
        }
    };

    match accounts.close(account.id, client.id).await {
        Ok(closed) => println!(
            "  Created client {} with closed account {}",
            client.name, closed.account_number
        ),
        Err(e) => eprintln!("Failed to close account {}: {e}", account.id),
    }
}
