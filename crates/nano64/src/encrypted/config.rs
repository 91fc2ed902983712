use core::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{ENCRYPTED_LEN, MIN_PAYLOAD_LEN, NONCE_LEN, cipher::Cipher};
use crate::{
    Error, Nano64, Nano64Generator, RandSource, Result, SystemClock, ThreadRandom, TimeSource,
    generate, id::hex,
};

/// An identifier together with its encrypted payload.
///
/// Returned by [`EncryptionConfig::encrypt`] and the `generate_encrypted*`
/// family. Hand out the payload and keep the identifier to yourself.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncryptedNano64 {
    id: Nano64,
    payload: [u8; ENCRYPTED_LEN],
}

impl EncryptedNano64 {
    /// The plaintext identifier.
    #[must_use]
    pub const fn id(&self) -> Nano64 {
        self.id
    }

    /// The encrypted payload: `nonce || ciphertext || tag`.
    #[must_use]
    pub const fn payload(&self) -> &[u8; ENCRYPTED_LEN] {
        &self.payload
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; ENCRYPTED_LEN] {
        self.payload
    }

    /// Returns the payload as 72 uppercase hex characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        ::hex::encode_upper(self.payload)
    }
}

impl fmt::Display for EncryptedNano64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for EncryptedNano64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedNano64")
            .field("id", &self.id)
            .field("payload", &self.to_hex())
            .finish()
    }
}

/// A configured AES-GCM key plus the clock and randomness used to mint and
/// encrypt identifiers.
///
/// The key length selects the cipher: 16 bytes for AES-128, 24 for AES-192
/// and 32 for AES-256. The config holds no mutable state and can be shared
/// freely across threads.
///
/// # Example
/// ```
/// use nano64::EncryptionConfig;
///
/// let config = EncryptionConfig::new(&[7u8; 32]).unwrap();
/// let encrypted = config.generate_encrypted_now().unwrap();
///
/// let id = config.decrypt_hex(&encrypted.to_hex()).unwrap();
/// assert_eq!(id, encrypted.id());
/// ```
#[derive(Clone)]
pub struct EncryptionConfig<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    cipher: Cipher,
    time: T,
    rng: R,
}

impl EncryptionConfig {
    /// Creates a config using [`SystemClock`] and [`ThreadRandom`].
    ///
    /// # Errors
    /// Returns [`Error::KeySize`] unless `key` is 16, 24 or 32 bytes long.
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::with_sources(key, SystemClock, ThreadRandom)
    }
}

impl<T, R> EncryptionConfig<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a config with an explicit clock and randomness source.
    ///
    /// # Errors
    /// Returns [`Error::KeySize`] unless `key` is 16, 24 or 32 bytes long.
    pub fn with_sources(key: &[u8], time: T, rng: R) -> Result<Self> {
        Ok(Self {
            cipher: Cipher::new(key)?,
            time,
            rng,
        })
    }

    /// The AES key size in bits: 128, 192 or 256.
    #[must_use]
    pub const fn key_bits(&self) -> usize {
        self.cipher.key_bits()
    }

    /// Encrypts `id` under a fresh nonce.
    ///
    /// # Errors
    /// Returns [`Error::Random`] if the nonce cannot be drawn.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn encrypt(&self, id: Nano64) -> Result<EncryptedNano64> {
        let mut payload = [0u8; ENCRYPTED_LEN];
        let (nonce, body) = payload.split_at_mut(NONCE_LEN);
        self.rng.fill_bytes(nonce)?;

        // Sealing eight bytes cannot exceed AES-GCM's message limit.
        let sealed = self
            .cipher
            .seal(nonce, &id.to_bytes())
            .map_err(|_| Error::Authentication)?;
        body.copy_from_slice(&sealed);

        Ok(EncryptedNano64 { id, payload })
    }

    /// Verifies and decrypts a payload produced by [`Self::encrypt`].
    ///
    /// # Errors
    /// - [`Error::Length`] if `payload` is shorter than nonce plus tag
    /// - [`Error::Authentication`] for anything that does not verify under
    ///   this key, including payloads of the wrong overall length
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn decrypt(&self, payload: &[u8]) -> Result<Nano64> {
        if payload.len() < MIN_PAYLOAD_LEN {
            return Err(Error::Length {
                expected: ENCRYPTED_LEN,
                actual: payload.len(),
            });
        }

        let (nonce, sealed) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .open(nonce, sealed)
            .map_err(|_| cold_authentication_failed())?;
        let bytes: [u8; Nano64::BYTES_LEN] = plaintext
            .as_slice()
            .try_into()
            .map_err(|_| cold_authentication_failed())?;
        Ok(Nano64::from_be_bytes(bytes))
    }

    /// [`Self::decrypt`] for the hex form produced by
    /// [`EncryptedNano64::to_hex`]. Either case is accepted.
    ///
    /// # Errors
    /// Returns [`Error::Format`] for malformed hex, otherwise as
    /// [`Self::decrypt`].
    pub fn decrypt_hex(&self, input: &str) -> Result<Nano64> {
        let payload = ::hex::decode(input)
            .map_err(|err| hex::from_hex_error(err, input, ENCRYPTED_LEN * 2))?;
        self.decrypt(&payload)
    }

    /// Mints an identifier at `timestamp` and encrypts it.
    ///
    /// # Errors
    /// Fails if the randomness source fails or `timestamp` exceeds 44 bits.
    pub fn generate_encrypted(&self, timestamp: u64) -> Result<EncryptedNano64> {
        let id = generate(timestamp, &self.rng)?;
        self.encrypt(id)
    }

    /// Mints a non-monotonic identifier from this config's clock and
    /// randomness source, then encrypts it.
    ///
    /// # Errors
    /// Fails if the randomness source fails or the clock reads beyond 44
    /// bits.
    pub fn generate_encrypted_now(&self) -> Result<EncryptedNano64> {
        let id = Nano64::from_sources(&self.time, &self.rng)?;
        self.encrypt(id)
    }

    /// Takes the next identifier from `generator` and encrypts it.
    ///
    /// Pass a monotonic generator to get encrypted IDs whose plaintexts are
    /// strictly increasing.
    ///
    /// # Errors
    /// Propagates the generator's error, or fails as [`Self::encrypt`].
    pub fn generate_encrypted_with<G>(&self, generator: &G) -> Result<EncryptedNano64>
    where
        G: Nano64Generator + ?Sized,
    {
        let id = generator.try_next_id()?;
        self.encrypt(id)
    }
}

impl<T, R> fmt::Debug for EncryptionConfig<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("cipher", &self.cipher)
            .finish_non_exhaustive()
    }
}

#[cold]
#[inline(never)]
fn cold_authentication_failed() -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!("Payload failed authentication");
    Error::Authentication
}
