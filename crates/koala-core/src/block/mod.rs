pub mod intercept;
pub mod matcher;
pub mod site;
pub mod stats;

pub use intercept::{Decision, InterceptConfig, Interceptor};
pub use site::{BlockList, BlockedSite};
pub use stats::BlockStats;
