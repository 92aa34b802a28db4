//! Transport between the engine and the recognizer process
//!
//! Two unidirectional FIFOs: commands out, recognized text in.

mod fifo;
mod framer;
mod protocol;

pub use fifo::{ensure_fifo, open_inbound, send_command, FIFO_MODE};
pub use framer::{DrainStop, LineFramer, READ_CHUNK};
pub use protocol::{CommandToken, LINE_END};
