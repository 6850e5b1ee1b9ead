pub mod identity_service;
pub mod mentorship_service;
pub mod quiz_service;
pub mod reward_service;

pub use identity_service::IdentityService;
pub use mentorship_service::MentorshipService;
pub use quiz_service::QuizService;
pub use reward_service::RewardService;
