// REST surface of the hosted backend.
//
// `client` owns transport mechanics; each table family lives in its own
// module as inherent methods on `RestClient`.

pub mod client;
pub mod models;
pub mod query;

mod lots;
mod occupancy;
mod payments;
mod reservations;
mod shifts;
mod spaces;
mod subscriptions;
pub mod tariffs;
