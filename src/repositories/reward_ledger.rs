use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
};

/// Durable per-user experience totals.
#[async_trait]
pub trait RewardLedger: Send + Sync {
    /// Adds `points` to the user's total and returns the new total.
    async fn award(&self, user_id: &str, points: u32) -> AppResult<i64>;
    async fn balance(&self, user_id: &str) -> AppResult<i64>;
    /// Deducts `cost` and unlocks `item` if the balance covers it. Returns the
    /// remaining balance, or `None` when funds are insufficient.
    async fn spend(&self, user_id: &str, cost: i64, item: &str) -> AppResult<Option<i64>>;
}

/// Stores experience on the user documents themselves.
pub struct MongoRewardLedger {
    collection: Collection<User>,
}

impl MongoRewardLedger {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.users(),
        }
    }

    fn after_update() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl RewardLedger for MongoRewardLedger {
    async fn award(&self, user_id: &str, points: u32) -> AppResult<i64> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "id": user_id },
                doc! { "$inc": { "xp": points as i64 } },
            )
            .with_options(Self::after_update())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;

        Ok(updated.xp)
    }

    async fn balance(&self, user_id: &str) -> AppResult<i64> {
        let user = self
            .collection
            .find_one(doc! { "id": user_id })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;

        Ok(user.xp)
    }

    async fn spend(&self, user_id: &str, cost: i64, item: &str) -> AppResult<Option<i64>> {
        // The balance check and the deduction happen in one document update
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "id": user_id, "xp": { "$gte": cost } },
                doc! {
                    "$inc": { "xp": -cost },
                    "$addToSet": { "unlocked_items": item },
                },
            )
            .with_options(Self::after_update())
            .await?;

        match updated {
            Some(user) => Ok(Some(user.xp)),
            None => {
                // Distinguish a missing user from an insufficient balance
                self.balance(user_id).await?;
                Ok(None)
            }
        }
    }
}
