use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::figure::model::Figure;
use crate::foundation::error::ReplayResult;

const XXH3_SEED: u64 = 0x3c1f_9e27_d04a_6b85;

/// Stable digest of a figure descriptor.
///
/// Two figures with the same fingerprint serialize to byte-identical JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FigureFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl fmt::Display for FigureFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

impl Figure {
    /// Digest of the canonical JSON serialization.
    pub fn fingerprint(&self) -> ReplayResult<FigureFingerprint> {
        let bytes = serde_json::to_vec(self)?;
        let mut h = Xxh3::with_seed(XXH3_SEED);
        h.update(&bytes);
        let v = h.digest128();
        Ok(FigureFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        })
    }
}
