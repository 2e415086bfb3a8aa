/// Size in bytes of a block digest.
pub const HASH_LENGTH: usize = 32;

/// Size in bytes of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// Length of an address rendered as hex, without any `0x` prefix.
pub const ADDRESS_HEX_LENGTH: usize = ADDRESS_LENGTH * 2;
