//! Wire-level data types exchanged with the webmail server.

pub mod attachment;
pub mod two_factor;
