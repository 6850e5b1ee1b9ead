use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::{FindOneAndUpdateOptions, IndexOptions, ReplaceOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{Database, USERS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_github_id(&self, github_id: &str) -> AppResult<Option<User>>;
    async fn update(&self, user: User) -> AppResult<User>;
    /// Sets the role only while none is recorded. Returns `None` when a role
    /// was already present (or the user does not exist).
    async fn set_role_if_unset(&self, id: &str, role: UserRole) -> AppResult<Option<User>>;
    async fn mark_onboarded(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.users();
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_github_id(&self, github_id: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "github_id": github_id })
            .await?;
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": &user.id }, &user)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user.id
            )));
        }

        Ok(user)
    }

    async fn set_role_if_unset(&self, id: &str, role: UserRole) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let user = self
            .collection
            .find_one_and_update(
                doc! { "id": id, "role": null },
                doc! { "$set": { "role": to_bson(&role)? } },
            )
            .with_options(options)
            .await?;
        Ok(user)
    }

    async fn mark_onboarded(&self, id: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "onboarded": true } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("User with id '{}' not found", id)));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(unique())
            .build();
        let github_index = IndexModel::builder()
            .keys(doc! { "github_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .build(),
            )
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(unique())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(github_index).await?;
        self.collection.create_index(username_index).await?;
        log::info!("Ensured indexes on {}", USERS_COLLECTION);

        Ok(())
    }
}
