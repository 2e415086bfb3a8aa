pub const NULL: u8 = b'n';
pub const TRUE: u8 = b't';
pub const FALSE: u8 = b'f';
pub const INTEGER_PREFIX: u8 = b'i';
pub const TEXT_PREFIX: u8 = b'u';
pub const LIST_PREFIX: u8 = b'l';
pub const DICTIONARY_PREFIX: u8 = b'd';
pub const LENGTH_SEPARATOR: u8 = b':';
pub const END: u8 = b'e';
