pub mod cipher;
pub mod codec;

pub use cipher::{Cipher, CryptoError, DecryptOutcome};
pub use codec::FieldCodec;
