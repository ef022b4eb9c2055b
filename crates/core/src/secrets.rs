use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Draws a uniform 4-digit numeric code. The same generator serves
/// credential tokens and delivery PINs.
pub fn numeric_code<R: Rng>(rng: &mut R) -> String {
    format!("{:04}", rng.gen_range(0..10_000))
}

pub fn generate_code() -> String {
    numeric_code(&mut OsRng)
}

/// Secrets are stored hashed; lookups hash the presented value and compare
/// at the store.
pub fn hash_secret(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn codes_are_four_digits_zero_padded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let code = numeric_code(&mut rng);
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn codes_cover_low_values_with_padding() {
        // Seeded run that is guaranteed to produce values below 1000 at
        // some point over enough draws.
        let mut rng = StdRng::seed_from_u64(42);
        let padded = (0..10_000)
            .map(|_| numeric_code(&mut rng))
            .any(|c| c.starts_with('0'));
        assert!(padded);
    }

    #[test]
    fn hashing_is_stable_and_hex() {
        let a = hash_secret("1234");
        let b = hash_secret("1234");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_secret("1235"));
    }
}
