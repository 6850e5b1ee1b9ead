pub mod claims;
pub mod github;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::{Claims, RefreshClaims};
pub use github::{GithubOAuthClient, GithubProfile};
pub use identity::IdentityContext;
pub use jwt::{JwtService, TokenPair};
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use utils::require_role;
