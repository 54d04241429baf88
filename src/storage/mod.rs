pub mod locations;

pub use locations::{LocationRecord, LocationStore, NewLocation, StoreError};
