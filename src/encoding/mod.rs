//! Textual encodings.
//!
//! - `phc`: the PHC string format for Argon2 hashes
//! - `b64`: the unpadded Base64 dialect used inside PHC strings

pub mod b64;
pub mod phc;

pub use phc::PhcHash;
