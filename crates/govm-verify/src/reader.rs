use std::io::{self, Read};

use crate::Hasher;

/// Reader adapter that hashes everything read through it.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R, H: Hasher> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self { Self { reader, hasher } }

    /// Hex digest of the bytes read so far.
    pub fn hex_digest(self) -> String { hex::encode(self.hasher.finalize()) }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256Hasher;
    use std::io::Cursor;

    #[test]
    fn verified_reader_success() {
        let data = b"test data for verification";
        let expected = hex::encode(Sha256Hasher::digest(data));

        let mut verified = VerifiedReader::new(Cursor::new(data), Sha256Hasher::new());
        io::copy(&mut verified, &mut io::sink()).unwrap();

        assert_eq!(verified.hex_digest(), expected);
    }

    #[test]
    fn partial_read_hashes_only_consumed_bytes() {
        let mut verified = VerifiedReader::new(Cursor::new(b"abcdef"), Sha256Hasher::new());
        let mut buf = [0u8; 3];
        verified.read_exact(&mut buf).unwrap();
        assert_eq!(verified.hex_digest(), hex::encode(Sha256Hasher::digest(b"abc")));
    }
}
