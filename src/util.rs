use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a new API token. The raw value is shown to the user once;
/// only the hash is stored.
pub fn generate_api_token() -> String {
    format!("dc_{}", Uuid::new_v4().simple())
}

/// Hash an API token for storage and lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"cardbox-v1:");
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate an opaque 16-digit card number.
pub fn generate_card_number() -> String {
    let mut rng = rand::thread_rng();
    (0..16).map(|_| rng.gen_range(0..10).to_string()).collect()
}
