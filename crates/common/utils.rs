use crate::H256;
use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> H256 {
    H256(Sha256::digest(data).into())
}
