//! `botforge seed` -- load a JSON fixture into a SQLite record store.

use anyhow::{Context, bail};

use botforge_infra::record::SeedData;
use botforge_infra::sqlite::SqliteRecordStore;
use botforge_infra::sqlite::pool::{default_data_dir, default_database_url};
use botforge_infra::store::StoreBackend;

use crate::cli::SeedArgs;

pub async fn seed(args: SeedArgs) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let data: SeedData = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid seed file", args.file.display()))?;

    let store_url = match args.store_url {
        Some(url) => url,
        None => {
            tokio::fs::create_dir_all(default_data_dir()).await?;
            default_database_url()
        }
    };
    if StoreBackend::from_url(&store_url)? != StoreBackend::Sqlite {
        bail!("seeding is only supported for sqlite: store URLs");
    }

    let store = SqliteRecordStore::connect(&store_url).await?;
    let summary = store.seed(data).await?;

    println!(
        "  {} Seeded {} bot(s) and {} conversation(s) into {}",
        console::style("✓").green().bold(),
        summary.bots,
        summary.conversations,
        console::style(&store_url).cyan()
    );
    Ok(())
}
