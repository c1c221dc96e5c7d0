pub mod draft;
pub mod group;
pub mod request;

pub use draft::{
    Budget, BudgetKind, Draft, Location, ProviderChoice, ProviderRef, ProviderSelection, Timing,
    TimingKind,
};
pub use group::{Group, GroupBook, GroupRequest};
pub use request::{RequestStatus, ServiceRequest};
