//! relay-dns application layer: the per-datagram forwarding engine and the
//! ports it drives.
pub mod ports;
pub mod use_cases;
