use anyhow::Result;
use mongodb::bson::doc;
use mongodb::{Client, Database};

/// Connect to MongoDB and verify the server is reachable.
///
/// The returned `Database` handle is a cheap clone over a pooled client; it is
/// constructed once at startup and injected into the repositories. Dropping the
/// last handle tears the connection pool down.
pub async fn connect(uri: &str, database: &str) -> Result<Database> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}
