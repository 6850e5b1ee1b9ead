pub mod mentorship_repository;
pub mod profile_repository;
pub mod reward_ledger;
pub mod user_repository;

pub use mentorship_repository::{MentorshipRepository, MongoMentorshipRepository};
pub use profile_repository::{MongoProfileRepository, ProfileRepository};
pub use reward_ledger::{MongoRewardLedger, RewardLedger};
pub use user_repository::{MongoUserRepository, UserRepository};
