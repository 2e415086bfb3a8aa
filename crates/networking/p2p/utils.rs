use flate2::{
    Compression,
    read::DeflateDecoder,
    write::DeflateEncoder,
};
use std::io::{self, Read, Write};

/// Largest value an inflated frame may expand to.
pub const MAX_INFLATED_SIZE: u64 = 16 * 1024 * 1024;

/// Compresses `data` as a raw DEFLATE stream (RFC 1951, no zlib or gzip header).
pub fn deflate_compress(data: &[u8], level: u32) -> Result<Vec<u8>, io::Error> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inflates a raw DEFLATE stream, refusing outputs over [`MAX_INFLATED_SIZE`].
pub fn deflate_decompress(data: &[u8]) -> Result<Vec<u8>, io::Error> {
    let mut inflated = Vec::new();
    DeflateDecoder::new(data)
        .take(MAX_INFLATED_SIZE + 1)
        .read_to_end(&mut inflated)?;
    if inflated.len() as u64 > MAX_INFLATED_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "inflated value exceeds the size limit",
        ));
    }
    Ok(inflated)
}
