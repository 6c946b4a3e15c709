//! rodio-backed `Transport`.
//!
//! A dedicated thread owns the output stream and the current sink. The
//! handle talks to it over `mpsc` in both directions: commands go in,
//! `TransportEvent`s tagged with the load they belong to come out.

mod sink;
mod thread;
mod transport;
mod types;

pub use transport::RodioTransport;

#[cfg(test)]
mod tests;
