use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{MentorProfile, MentorshipSession, StudentProfile, User},
};

pub const USERS_COLLECTION: &str = "users";
pub const STUDENTS_COLLECTION: &str = "students";
pub const MENTORS_COLLECTION: &str = "mentors";
pub const MENTORSHIP_SESSIONS_COLLECTION: &str = "mentorship_sessions";

const APP_NAME: &str = "eduhive-server";

/// Handle on the EduHive database. Cheap to clone; every repository gets its
/// typed collection from here.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let options = client_options(&config.mongo_conn_string).await?;
        let db = Self {
            client: Client::with_options(options)?,
            db_name: config.mongo_db_name.clone(),
        };

        db.ping().await?;
        log::info!("Connected to MongoDB database '{}'", db.db_name);

        Ok(db)
    }

    /// Round trip used at startup and by the readiness probe.
    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.client.database(&self.db_name).collection(name)
    }

    /// Accounts. Also carries the XP balance and unlocked shop items.
    pub fn users(&self) -> Collection<User> {
        self.collection(USERS_COLLECTION)
    }

    pub fn students(&self) -> Collection<StudentProfile> {
        self.collection(STUDENTS_COLLECTION)
    }

    pub fn mentors(&self) -> Collection<MentorProfile> {
        self.collection(MENTORS_COLLECTION)
    }

    pub fn mentorship_sessions(&self) -> Collection<MentorshipSession> {
        self.collection(MENTORSHIP_SESSIONS_COLLECTION)
    }
}

async fn client_options(conn_string: &str) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(conn_string).await?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(APP_NAME.to_string());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(2);
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_options_pin_server_api_and_pool() {
        let options = client_options("mongodb://localhost:27017").await.unwrap();

        assert_eq!(options.app_name.as_deref(), Some(APP_NAME));
        assert!(options.server_api.is_some());
        assert_eq!(options.max_pool_size, Some(10));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_malformed_connection_string_is_rejected() {
        assert!(client_options("not-a-mongo-uri").await.is_err());
    }
}
