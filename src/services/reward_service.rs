use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::shop::{find_item, SHOP_ITEMS},
        dto::{
            request::RedeemRequest,
            response::{RedemptionResponse, RewardsView},
        },
    },
    quiz::{GrowthModel, GrowthSnapshot},
    repositories::{RewardLedger, UserRepository},
};

const INSUFFICIENT_XP: &str = "Insufficient XP in the Hive";

pub struct RewardService {
    ledger: Arc<dyn RewardLedger>,
    users: Arc<dyn UserRepository>,
    growth: GrowthModel,
}

impl RewardService {
    pub fn new(ledger: Arc<dyn RewardLedger>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            ledger,
            users,
            growth: GrowthModel::default(),
        }
    }

    pub async fn growth(&self, user_id: &str) -> AppResult<GrowthSnapshot> {
        let xp = self.ledger.balance(user_id).await?;
        Ok(self.growth.snapshot(xp.max(0) as u64))
    }

    pub async fn overview(&self, user_id: &str) -> AppResult<RewardsView> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;

        Ok(RewardsView {
            growth: self.growth.snapshot(user.xp_balance()),
            unlocked_items: user.unlocked_items,
            shop: SHOP_ITEMS.to_vec(),
        })
    }

    /// An unaffordable item is a rejection, not an error, and leaves the
    /// balance untouched.
    pub async fn redeem(&self, user_id: &str, request: RedeemRequest) -> AppResult<RedemptionResponse> {
        request.validate()?;
        let item = find_item(&request.item_id)
            .ok_or_else(|| AppError::NotFound(format!("Shop item '{}' not found", request.item_id)))?;

        match self.ledger.spend(user_id, item.cost, item.id).await? {
            Some(balance) => {
                log::info!("User {} unlocked {} for {} XP", user_id, item.id, item.cost);
                Ok(RedemptionResponse::Granted {
                    item_id: item.id.to_string(),
                    balance,
                })
            }
            None => {
                let balance = self.ledger.balance(user_id).await?;
                log::debug!(
                    "User {} cannot afford {} ({} < {})",
                    user_id,
                    item.id,
                    balance,
                    item.cost
                );
                Ok(RedemptionResponse::Rejected {
                    item_id: item.id.to_string(),
                    balance,
                    message: INSUFFICIENT_XP.to_string(),
                })
            }
        }
    }
}
