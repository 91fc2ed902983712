use aes_gcm::{
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
    aead::{self, Aead, KeyInit, consts::U12},
    aes::Aes192,
};
use core::fmt;

use crate::{Error, Result};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES-GCM keyed with one of the three AES key sizes.
#[derive(Clone)]
pub(crate) enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    /// Selects the AES variant from the key length.
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        let len = key.len();
        let cipher = match len {
            16 => Aes128Gcm::new_from_slice(key).map(Self::Aes128),
            24 => Aes192Gcm::new_from_slice(key).map(Self::Aes192),
            32 => Aes256Gcm::new_from_slice(key).map(Self::Aes256),
            _ => return Err(Error::KeySize { len }),
        };
        cipher.map_err(|_| Error::KeySize { len })
    }

    pub(crate) const fn key_bits(&self) -> usize {
        match self {
            Self::Aes128(_) => 128,
            Self::Aes192(_) => 192,
            Self::Aes256(_) => 256,
        }
    }

    /// Returns `ciphertext || tag`.
    pub(crate) fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aead::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes192(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        }
    }

    /// Verifies and decrypts `ciphertext || tag`.
    pub(crate) fn open(&self, nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>, aead::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.decrypt(nonce, sealed),
            Self::Aes192(c) => c.decrypt(nonce, sealed),
            Self::Aes256(c) => c.decrypt(nonce, sealed),
        }
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aes{}Gcm", self.key_bits())
    }
}
