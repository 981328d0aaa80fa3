//! CSRF token generation.

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a CSRF token: 32 bytes from the OS CSPRNG, hex-encoded to a
/// 64-character lowercase string.
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
