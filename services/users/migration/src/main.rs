use sea_orm_migration::prelude::*;

use nimbus_users_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
