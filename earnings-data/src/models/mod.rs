pub mod chart;
pub mod cli;
pub mod creator;
pub mod domain;
pub mod purchase;
pub mod top;

pub use chart::*;
pub use cli::*;
pub use creator::*;
pub use domain::*;
pub use purchase::*;
pub use top::*;
