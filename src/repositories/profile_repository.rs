use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, MENTORS_COLLECTION, STUDENTS_COLLECTION},
    errors::AppResult,
    models::domain::{MentorProfile, StudentProfile},
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn upsert_student(&self, profile: StudentProfile) -> AppResult<StudentProfile>;
    async fn find_student(&self, user_id: &str) -> AppResult<Option<StudentProfile>>;
    async fn upsert_mentor(&self, profile: MentorProfile) -> AppResult<MentorProfile>;
    async fn find_mentor(&self, user_id: &str) -> AppResult<Option<MentorProfile>>;
    async fn list_mentors(&self) -> AppResult<Vec<MentorProfile>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoProfileRepository {
    students: Collection<StudentProfile>,
    mentors: Collection<MentorProfile>,
}

impl MongoProfileRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            students: db.students(),
            mentors: db.mentors(),
        }
    }

    fn upsert() -> ReplaceOptions {
        ReplaceOptions::builder().upsert(true).build()
    }

    fn user_id_index() -> IndexModel {
        IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build()
    }
}

#[async_trait]
impl ProfileRepository for MongoProfileRepository {
    async fn upsert_student(&self, profile: StudentProfile) -> AppResult<StudentProfile> {
        self.students
            .replace_one(doc! { "user_id": &profile.user_id }, &profile)
            .with_options(Self::upsert())
            .await?;
        Ok(profile)
    }

    async fn find_student(&self, user_id: &str) -> AppResult<Option<StudentProfile>> {
        Ok(self.students.find_one(doc! { "user_id": user_id }).await?)
    }

    async fn upsert_mentor(&self, profile: MentorProfile) -> AppResult<MentorProfile> {
        self.mentors
            .replace_one(doc! { "user_id": &profile.user_id }, &profile)
            .with_options(Self::upsert())
            .await?;
        Ok(profile)
    }

    async fn find_mentor(&self, user_id: &str) -> AppResult<Option<MentorProfile>> {
        Ok(self.mentors.find_one(doc! { "user_id": user_id }).await?)
    }

    async fn list_mentors(&self) -> AppResult<Vec<MentorProfile>> {
        let cursor = self
            .mentors
            .find(doc! {})
            .sort(doc! { "full_name": 1 })
            .await?;
        let mentors: Vec<MentorProfile> = cursor.try_collect().await?;
        Ok(mentors)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.students.create_index(Self::user_id_index()).await?;
        self.mentors.create_index(Self::user_id_index()).await?;
        log::info!(
            "Ensured indexes on {} and {}",
            STUDENTS_COLLECTION,
            MENTORS_COLLECTION
        );
        Ok(())
    }
}
