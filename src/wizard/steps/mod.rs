//! Step controllers for the screens before review.

pub mod category;
pub mod details;
pub mod location;
pub mod provider;

pub use category::CategoryStep;
pub use details::DetailsStep;
pub use location::LocationStep;
pub use provider::ProviderStep;
