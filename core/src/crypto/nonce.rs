// ## 📂 File: `src/crypto/nonce.rs`

//! Per-frame IV generation.
//!
//! Every frame gets a fresh 12-byte IV from the thread-local CSPRNG. With
//! random 96-bit IVs the birthday bound keeps collisions negligible for the
//! frame counts one container can hold (at most 2^32).

use rand::RngCore;

use crate::constants::IV_LEN_12;

#[inline]
pub fn random_iv() -> [u8; IV_LEN_12] {
    let mut iv = [0u8; IV_LEN_12];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ivs_are_not_repeated() {
        let a = random_iv();
        let b = random_iv();
        assert_ne!(a, b);
    }
}
