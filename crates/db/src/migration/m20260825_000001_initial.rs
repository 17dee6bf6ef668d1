//! Initial database migration.
//!
//! Creates the enum types, the clients and accounts tables, and their
//! indexes. Uniqueness (client email, account number) and the restrictive
//! client/account foreign key are enforced here so concurrent writers cannot
//! slip past the repository pre-checks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Client standing
CREATE TYPE client_status AS ENUM (
    'active',
    'blocked',
    'suspended'
);

-- Account lifecycle state ('closed' is terminal)
CREATE TYPE account_status AS ENUM ('active', 'closed');

-- Account product category
CREATE TYPE account_type AS ENUM (
    'debit',
    'credit',
    'savings'
);

-- Account service plan
CREATE TYPE account_plan AS ENUM (
    'basic',
    'standard',
    'premium'
);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id SERIAL PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    phone VARCHAR(20) NOT NULL,
    status client_status NOT NULL DEFAULT 'active',
    create_date TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_clients_name ON clients(name);
CREATE INDEX idx_clients_status ON clients(status) WHERE status = 'active';
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id SERIAL PRIMARY KEY,
    account_number VARCHAR(36) NOT NULL UNIQUE,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    status account_status NOT NULL DEFAULT 'active',
    account_type account_type NOT NULL,
    plan account_plan NOT NULL DEFAULT 'basic',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE RESTRICT
);

-- Listing contract: newest accounts first per client
CREATE INDEX idx_accounts_client_created ON accounts(client_id, created_at DESC);
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS clients CASCADE;

DROP TYPE IF EXISTS account_plan;
DROP TYPE IF EXISTS account_type;
DROP TYPE IF EXISTS account_status;
DROP TYPE IF EXISTS client_status;
";
