mod address;

pub use address::{address_from_hex, address_to_hex};
