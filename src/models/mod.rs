pub mod package;
pub mod shipment;
pub mod tracking;
pub mod user;
