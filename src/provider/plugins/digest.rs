use ring::digest::{digest, SHA256};

use crate::provider::capability::Digest;

#[derive(Debug, Clone, Copy, Default)]
pub struct RingDigest;

impl Digest for RingDigest {
    fn sha256_hex(&self, data: &[u8]) -> String {
        digest(&SHA256, data)
            .as_ref()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect()
    }
}
