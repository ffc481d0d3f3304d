//! Key-blob parsing.
//!
//! Accepts one PEM block holding either a PKCS#1 `RSAPublicKey` or a
//! SubjectPublicKeyInfo. The DER content decides which; the PEM label is
//! ignored.

use rsa::pkcs1::RsaPublicKey as Pkcs1PublicKey;
use rsa::{BigUint, RsaPublicKey};
use spki::der::Decode;
use spki::SubjectPublicKeyInfoRef;

use crate::error::{KeyError, KeyResult};

/// Largest modulus accepted, in bits.
///
/// `RsaPublicKey::new` stops at 4096, which rejects keys other verifiers take.
pub const MAX_MODULUS_BITS: usize = 16384;

/// Which DER structure a key was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// PKCS#1 `RSAPublicKey`.
    Pkcs1,
    /// PKIX SubjectPublicKeyInfo.
    Spki,
}

/// Parse a PEM blob into an RSA public key, trying PKCS#1 then PKIX.
pub(crate) fn parse_public_key_pem(data: &[u8]) -> KeyResult<(RsaPublicKey, KeyEncoding)> {
    let block = pem::parse(data)
        .map_err(|e| KeyError::malformed_key(format!("no PEM block: {}", e)))?;
    parse_public_key_der(block.contents())
}

pub(crate) fn parse_public_key_der(der: &[u8]) -> KeyResult<(RsaPublicKey, KeyEncoding)> {
    let pkcs1_err = match rsa_key_from_pkcs1(der) {
        Ok(key) => return Ok((key, KeyEncoding::Pkcs1)),
        Err(e) => e,
    };

    let spki = SubjectPublicKeyInfoRef::from_der(der).map_err(|e| {
        KeyError::malformed_key(format!(
            "didn't parse with pkcs1 ({}) or pkix ({})",
            pkcs1_err, e
        ))
    })?;

    if spki.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        return Err(KeyError::UnsupportedKeyType {
            algorithm: spki.algorithm.oid.to_string(),
        });
    }

    let inner = spki
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| KeyError::malformed_key("invalid RSA key in SPKI: unaligned bit string"))?;
    rsa_key_from_pkcs1(inner)
        .map(|key| (key, KeyEncoding::Spki))
        .map_err(|e| KeyError::malformed_key(format!("invalid RSA key in SPKI: {}", e)))
}

/// Decode a PKCS#1 `RSAPublicKey` and build the key with the raised size cap.
fn rsa_key_from_pkcs1(der: &[u8]) -> Result<RsaPublicKey, String> {
    let decoded = Pkcs1PublicKey::from_der(der).map_err(|e| e.to_string())?;
    RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(decoded.modulus.as_bytes()),
        BigUint::from_bytes_be(decoded.public_exponent.as_bytes()),
        MAX_MODULUS_BITS,
    )
    .map_err(|e| e.to_string())
}
