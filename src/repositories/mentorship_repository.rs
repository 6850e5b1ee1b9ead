use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, IndexModel};

use crate::{
    db::{Database, MENTORSHIP_SESSIONS_COLLECTION},
    errors::AppResult,
    models::domain::MentorshipSession,
};

#[async_trait]
pub trait MentorshipRepository: Send + Sync {
    async fn create(&self, session: MentorshipSession) -> AppResult<MentorshipSession>;
    /// Everything addressed to a mentor: their broadcasts and incoming bookings.
    async fn list_by_mentor(&self, mentor_id: &str) -> AppResult<Vec<MentorshipSession>>;
    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<MentorshipSession>>;
    /// Broadcast sessions still marked upcoming, soonest first.
    async fn list_upcoming(&self) -> AppResult<Vec<MentorshipSession>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoMentorshipRepository {
    collection: Collection<MentorshipSession>,
}

impl MongoMentorshipRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.mentorship_sessions(),
        }
    }
}

#[async_trait]
impl MentorshipRepository for MongoMentorshipRepository {
    async fn create(&self, session: MentorshipSession) -> AppResult<MentorshipSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn list_by_mentor(&self, mentor_id: &str) -> AppResult<Vec<MentorshipSession>> {
        let cursor = self
            .collection
            .find(doc! { "mentor_id": mentor_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<MentorshipSession>> {
        let cursor = self
            .collection
            .find(doc! { "student_id": student_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_upcoming(&self) -> AppResult<Vec<MentorshipSession>> {
        let cursor = self
            .collection
            .find(doc! { "kind": "broadcast", "status": "upcoming" })
            .sort(doc! { "scheduled_date": 1, "scheduled_time": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let mentor_index = IndexModel::builder().keys(doc! { "mentor_id": 1 }).build();
        let student_index = IndexModel::builder().keys(doc! { "student_id": 1 }).build();

        self.collection.create_index(mentor_index).await?;
        self.collection.create_index(student_index).await?;
        log::info!("Ensured indexes on {}", MENTORSHIP_SESSIONS_COLLECTION);
        Ok(())
    }
}
