//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app (kernel-facing).
//! - `adapters`: storage/IO specific implementations.

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{kernel_bus, Drained, KernelBusReceiver, KernelBusSender, KernelMessage};
