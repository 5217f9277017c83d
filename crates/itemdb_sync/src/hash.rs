//! Content hashing for sprite identity.

use md5::{Digest, Md5};

/// Computes the MD5 digest of a byte buffer.
///
/// Sprite hashes are identity fingerprints, not a security boundary, so
/// MD5's known weaknesses do not matter here; the format has carried MD5
/// digests since its inception and every consumer expects them.
#[must_use]
pub fn md5_bytes(data: &[u8]) -> [u8; 16] {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(digest: [u8; 16]) -> String {
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    // RFC 1321 appendix A.5 test suite.
    #[test]
    fn rfc1321_vectors() {
        assert_eq!(hex(md5_bytes(b"")), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hex(md5_bytes(b"a")), "0cc175b9c0f1b6a831c399e269772661");
        assert_eq!(hex(md5_bytes(b"abc")), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            hex(md5_bytes(b"message digest")),
            "f96b697d7cb7938d525a2f31aaf161d0"
        );
        assert_eq!(
            hex(md5_bytes(b"abcdefghijklmnopqrstuvwxyz")),
            "c3fcd3d76192e4007dfb496cca67e13b"
        );
    }

    #[test]
    fn digest_is_input_sensitive() {
        assert_ne!(md5_bytes(b"abc"), md5_bytes(b"abd"));
    }
}
