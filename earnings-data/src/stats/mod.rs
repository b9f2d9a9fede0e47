pub mod analytics;
pub mod collation;
pub mod leaderboard;
pub mod purchases;
pub mod range;

pub use analytics::*;
pub use collation::*;
pub use leaderboard::*;
pub use purchases::*;
pub use range::*;
