use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

use crate::models::{CartItem, Class, Instructor, Payment, User};

pub const USERS: &str = "users";
pub const INSTRUCTORS: &str = "instructors";
pub const CLASSES: &str = "classes";
pub const CARTS: &str = "carts";
pub const PAYMENTS: &str = "payments";

/// Process-wide MongoDB handle. Built once in `main`, cloned into every
/// handler via `web::Data`.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, database_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(database_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the query paths rely on.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let unique = IndexOptions::builder().unique(true).build();
        let models: Vec<(&str, IndexModel)> = vec![
            (
                USERS,
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique)
                    .build(),
            ),
            (CLASSES, IndexModel::builder().keys(doc! { "status": 1 }).build()),
            (
                CLASSES,
                IndexModel::builder().keys(doc! { "ins_email": 1 }).build(),
            ),
            (CARTS, IndexModel::builder().keys(doc! { "email": 1 }).build()),
            (
                PAYMENTS,
                IndexModel::builder()
                    .keys(doc! { "email": 1, "date": -1 })
                    .build(),
            ),
        ];

        for (collection, model) in models {
            let coll = self.db.collection::<Document>(collection);
            match coll.create_index(model).await {
                Ok(idx) => log::info!("   ✅ Index ready: {}({})", collection, idx.index_name),
                Err(e) => log::debug!("   ℹ️  Index already exists on {}: {}", collection, e),
            }
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn users(&self) -> Collection<User> {
        self.collection(USERS)
    }

    pub fn instructors(&self) -> Collection<Instructor> {
        self.collection(INSTRUCTORS)
    }

    pub fn classes(&self) -> Collection<Class> {
        self.collection(CLASSES)
    }

    pub fn carts(&self) -> Collection<CartItem> {
        self.collection(CARTS)
    }

    pub fn payments(&self) -> Collection<Payment> {
        self.collection(PAYMENTS)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Closes the connection pool. Call after the HTTP server has drained.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_connection_and_indexes() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri, "booking_test").await;
        assert!(db.is_ok());
        assert!(db.unwrap().health_check().await.is_ok());
    }
}
