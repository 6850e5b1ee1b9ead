pub mod mentorship;
pub mod profile;
pub mod resource;
pub mod shop;
pub mod user;

pub use mentorship::{MentorshipKind, MentorshipSession, MentorshipStatus};
pub use profile::{AcademicYear, MentorProfile, StudentProfile};
pub use resource::{Resource, ResourceSummary};
pub use shop::ShopItem;
pub use user::{User, UserRole};
