mod memory;
mod mongo_store;
mod store;
#[cfg(test)]
mod unavailable;

pub use memory::MemoryStore;
pub use store::{Store, StoreError, StoreResult};
#[cfg(test)]
pub use unavailable::{UnavailableStore, UNAVAILABLE_DETAIL};

use mongodb::{Client, Collection, Database};

pub const USERS: &str = "users";
pub const COURSES: &str = "courses";
pub const ENROLLMENTS: &str = "enrollments";
pub const NEWS: &str = "news";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> StoreResult<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host:27017/course_booking
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| "course_booking".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the queries rely on.
    async fn ensure_indexes(&self) -> StoreResult<()> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // Backs the duplicate-name check on course creation
        let courses = self.collection::<mongodb::bson::Document>(COURSES);
        let course_name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match courses.create_index(course_name_index).await {
            Ok(_) => log::info!("   ✅ Index created: courses(name) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create unique index on courses(name): {}", e),
        }

        // Not unique: registration does not reject a repeated email
        let users = self.collection::<mongodb::bson::Document>(USERS);
        let email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();

        match users.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let enrollments = self.collection::<mongodb::bson::Document>(ENROLLMENTS);
        let enrollment_user_index = IndexModel::builder().keys(doc! { "userId": 1 }).build();

        match enrollments.create_index(enrollment_user_index).await {
            Ok(_) => log::info!("   ✅ Index created: enrollments(userId)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn connects_and_pings() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/course_booking_test".to_string());

        let db = MongoDB::new(&uri).await.unwrap();
        assert!(db.ping().await.is_ok());
    }
}
