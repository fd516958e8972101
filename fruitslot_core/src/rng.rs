use hmac::{Hmac, Mac};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};

// Provably-fair construction:
// server_seed (secret) + client_seed + nonce -> HMAC-SHA256 -> bytes -> floats in [0,1)

pub type HmacSha256 = Hmac<Sha256>;

/// Uniform `[0,1)` values consumed by the symbol generator.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

fn chunk_to_unit(chunk: &[u8]) -> f64 {
    let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    (v as f64) / (u32::MAX as f64 + 1.0)
}

pub fn derive_floats(hmac_bytes: &[u8], count: usize) -> Vec<f64> {
    let mut stream = ByteStream::new(hmac_bytes.to_vec());
    (0..count).map(|_| stream.next_unit()).collect()
}

// Successive 4-byte chunks; when exhausted the buffer is replaced by its SHA-256.
#[derive(Debug, Clone)]
struct ByteStream {
    buffer: Vec<u8>,
    cursor: usize,
}

impl ByteStream {
    fn new(buffer: Vec<u8>) -> Self {
        Self { buffer, cursor: 0 }
    }

    fn next_unit(&mut self) -> f64 {
        if self.cursor + 4 > self.buffer.len() {
            self.buffer = Sha256::digest(&self.buffer).to_vec();
            self.cursor = 0;
        }
        let f = chunk_to_unit(&self.buffer[self.cursor..self.cursor + 4]);
        self.cursor += 4;
        f
    }
}

#[derive(Debug, Clone)]
pub struct ProvablyFairRng {
    pub server_seed: String, // secret
    pub client_seed: String,
    pub nonce: u64,
    stream: ByteStream,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        let server_seed = server_seed.into();
        let client_seed = client_seed.into();
        let stream = ByteStream::new(hmac_bytes(&server_seed, &client_seed, nonce).to_vec());
        Self {
            server_seed,
            client_seed,
            nonce,
            stream,
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        hmac_bytes(&self.server_seed, &self.client_seed, self.nonce)
    }

    /// First `count` values for these seeds, independent of what was already drawn.
    pub fn next_floats(&self, count: usize) -> Vec<f64> {
        derive_floats(&self.hmac_bytes(), count)
    }
}

fn hmac_bytes(server_seed: &str, client_seed: &str, nonce: u64) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(server_seed.as_bytes())
        .expect("HMAC takes keys of any length");
    mac.update(format!("{client_seed}:{nonce}").as_bytes());
    let res = mac.finalize().into_bytes();
    let mut out = [0u8; 32];
    out.copy_from_slice(&res);
    out
}

impl RandomSource for ProvablyFairRng {
    fn next_unit(&mut self) -> f64 {
        self.stream.next_unit()
    }
}

/// Adapter for any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl RandSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RandSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let rng1 = ProvablyFairRng::new("server", "client", 1);
        let rng2 = ProvablyFairRng::new("server", "client", 1);
        assert_eq!(rng1.server_seed_hash_hex(), rng2.server_seed_hash_hex());
        assert_eq!(rng1.hmac_bytes().to_vec(), rng2.hmac_bytes().to_vec());
        assert_eq!(rng1.next_floats(5), rng2.next_floats(5));
    }

    #[test]
    fn stream_matches_batch_past_first_digest() {
        // 32 bytes give 8 values, so 20 values cross two rehashes
        let mut rng = ProvablyFairRng::new("server", "client", 9);
        let batch = rng.next_floats(20);
        let streamed: Vec<f64> = (0..20).map(|_| rng.next_unit()).collect();
        assert_eq!(batch, streamed);
        assert!(streamed.iter().all(|f| (0.0..1.0).contains(f)));
    }

    #[test]
    fn nonce_changes_stream() {
        let a = ProvablyFairRng::new("server", "client", 1).next_floats(4);
        let b = ProvablyFairRng::new("server", "client", 2).next_floats(4);
        assert_ne!(a, b);
    }

    #[test]
    fn seed_hash_is_sha256_hex() {
        assert_eq!(
            derive_hash_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn seeded_rand_source_in_range() {
        let mut rng = RandSource::seeded(7);
        for _ in 0..1000 {
            let f = rng.next_unit();
            assert!((0.0..1.0).contains(&f));
        }
    }
}
