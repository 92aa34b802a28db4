//! Process lifecycle helpers for the adapter binary

mod shutdown;

pub use shutdown::ShutdownSignal;
