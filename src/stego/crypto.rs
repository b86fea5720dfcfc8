// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Envelope encryption.
//!
//! - **Key derivation**: PBKDF2-HMAC-SHA1 over the UTF-8 passphrase with a
//!   fixed application salt and [`KDF_ITERATIONS`] rounds, producing an
//!   AES-256 key.
//! - **Cipher**: AES-256-CBC with PKCS#7 padding. A fresh random IV is
//!   stored in clear in front of the ciphertext.
//!
//! There is no authentication tag; integrity is only checked through the
//! envelope's MD5 after decryption. A wrong passphrase usually surfaces as
//! an unsupported version, a malformed envelope or a hash mismatch rather
//! than as [`StegoError::DecryptionFailed`].
//!
//! The pixel stream carries random filler after the ciphertext, so
//! decryption cannot simply unpad the whole stream. It decrypts the first
//! two blocks, reads the envelope length from the header and then decrypts
//! exactly the padded ciphertext span.

use aes::Aes256;
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;
use crate::stego::frame;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-CBC IV length in bytes.
pub const IV_LEN: usize = 16;
/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;
/// Derived key length (AES-256).
pub const KEY_LEN: usize = 32;
/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 4854;

/// Fixed PBKDF2 salt shared by every embedder and extractor.
///
/// Not secret; it only has to be identical on both sides.
const KDF_SALT: &[u8] = b"Arguing that you don't care about the right to privacy because you \
have nothing to hide is no different than saying you don't care about free speech because you \
have nothing to say.";

/// Whether a passphrase turns encryption on.
pub fn is_enabled(passphrase: &str) -> bool {
    !passphrase.is_empty()
}

/// Derive the AES-256 key from a passphrase.
pub fn derive_key(passphrase: &str) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha1>(passphrase.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut *key);
    key
}

/// Encrypt an envelope built with a reserved IV slot.
///
/// Fills the slot with a random IV and replaces the rest with its
/// AES-256-CBC/PKCS#7 ciphertext.
///
/// # Errors
/// Returns [`StegoError::FrameMalformed`] if `frame` is shorter than the
/// IV slot.
pub fn encrypt(mut frame: Vec<u8>, passphrase: &str) -> Result<Vec<u8>, StegoError> {
    if frame.len() < IV_LEN {
        return Err(StegoError::FrameMalformed);
    }
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    encrypt_with_iv(&mut frame, passphrase, iv);
    Ok(frame)
}

fn encrypt_with_iv(frame: &mut Vec<u8>, passphrase: &str, iv: [u8; IV_LEN]) {
    let key = derive_key(passphrase);
    let ciphertext = Aes256CbcEnc::new(GenericArray::from_slice(&key[..]), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(&frame[IV_LEN..]);
    frame.truncate(IV_LEN);
    frame[..IV_LEN].copy_from_slice(&iv);
    frame.extend_from_slice(&ciphertext);
}

/// Decrypt an encrypted stream back to the plaintext envelope (starting at
/// its version byte, without filler).
///
/// # Errors
/// - [`StegoError::DecryptionFailed`] if the stream is shorter than the IV
///   plus two blocks, or the padding is invalid.
/// - [`StegoError::UnsupportedVersion`] if the decrypted header declares a
///   newer format.
/// - [`StegoError::FrameMalformed`] if the declared length reaches past the
///   stream.
pub fn decrypt(stream: &[u8], passphrase: &str) -> Result<Vec<u8>, StegoError> {
    if stream.len() < IV_LEN + 2 * BLOCK_LEN {
        return Err(StegoError::DecryptionFailed);
    }
    let (iv_bytes, body) = stream.split_at(IV_LEN);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(iv_bytes);
    let key = derive_key(passphrase);

    // The header (22 bytes) always lies within the first two blocks.
    let mut head = [0u8; 2 * BLOCK_LEN];
    head.copy_from_slice(&body[..2 * BLOCK_LEN]);
    Aes256CbcDec::new(GenericArray::from_slice(&key[..]), &iv.into())
        .decrypt_padded_mut::<NoPadding>(&mut head)
        .map_err(|_| StegoError::DecryptionFailed)?;

    let plain_len = frame::frame_len(&head)?;
    let cipher_len = (plain_len / BLOCK_LEN + 1) * BLOCK_LEN;
    if cipher_len > body.len() {
        return Err(StegoError::FrameMalformed);
    }

    let mut buf = body[..cipher_len].to_vec();
    let unpadded = Aes256CbcDec::new(GenericArray::from_slice(&key[..]), &iv.into())
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| StegoError::DecryptionFailed)?
        .len();
    if unpadded != plain_len {
        return Err(StegoError::DecryptionFailed);
    }
    buf.truncate(unpadded);
    Ok(buf)
}
