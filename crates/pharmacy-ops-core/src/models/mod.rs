//! Domain models for the pharmacy operations system.

mod alerts;
mod batch;
mod drug;
mod inventory;
mod receipt;
mod stock;

pub use alerts::*;
pub use batch::*;
pub use drug::*;
pub use inventory::*;
pub use receipt::*;
pub use stock::*;
