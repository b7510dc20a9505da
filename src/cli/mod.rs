pub mod brands;
pub mod record;
pub mod search;

use anyhow::Result;

use crate::store::Db;
use crate::util::env as env_util;

/// Pool size for short-lived CLI invocations.
const CLI_MAX_CONNECTIONS: u32 = 5;

/// Shared connect path for the subcommands: explicit `--db-url` override
/// first, then the env resolution chain (session pooler preferred).
pub(crate) async fn connect(database_url: Option<&str>) -> Result<Db> {
    env_util::init_env();
    let db_url = match database_url {
        Some(url) => url.to_string(),
        None => env_util::db_url_prefer_session().map_err(|e| {
            anyhow::anyhow!(
                "no database URL; set SUPABASE_DB_SESSION_URL / DATABASE_URL / SUPABASE_DB_URL ({e})"
            )
        })?,
    };
    Db::connect(&db_url, CLI_MAX_CONNECTIONS).await
}
