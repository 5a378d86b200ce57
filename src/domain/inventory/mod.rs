//! Inventory domain module

mod instruction;
mod stock;

pub use instruction::Instruction;
pub use stock::Inventory;
