//! Webshare login digest.
//!
//! The backend expects a fixed three-stage hash chain over the account
//! password and a per-account salt:
//!
//! ```text
//! stage1 = md5_hex(password + salt)
//! stage2 = sha1_hex(stage1)
//! digest = md5_hex(username + ":" + REALM + ":" + stage2)
//! ```
//!
//! `stage2` is submitted as the password field and `digest` as the digest field.

use md5::{Digest, Md5};
use sha1::Sha1;

pub const REALM: &str = "Webshare";

/// Login fields derived from the account password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDigest {
    pub password: String,
    pub digest: String,
}

pub fn login_digest(username: &str, password: &str, salt: &str) -> LoginDigest {
    let stage1 = md5_hex(format!("{password}{salt}").as_bytes());
    let stage2 = sha1_hex(stage1.as_bytes());
    let digest = md5_hex(format!("{username}:{REALM}:{stage2}").as_bytes());

    LoginDigest {
        password: stage2,
        digest,
    }
}

fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
