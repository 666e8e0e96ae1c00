//! PKCS#10 Certificate Signing Request assembly.
//!
//! The DER structure is built by hand, TLV by TLV, rather than through a
//! self-signing certificate-generation crate: the only thing this client
//! needs is a CSR with a single CN and a non-critical SAN extension, signed
//! by an RSA key, and that is a small, fixed shape.

use crate::crypto::signer::sign_rs256;
use crate::error::{AcmeError, Result};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

const RSA_ENCRYPTION_OID: [u8; 11] = [0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];
const SHA256_WITH_RSA_OID: [u8; 11] = [0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b];
const CN_OID: [u8; 5] = [0x06, 0x03, 0x55, 0x04, 0x03];
const SAN_EXTENSION_OID: [u8; 5] = [0x06, 0x03, 0x55, 0x1d, 0x11];
const EXTENSION_REQUEST_OID: [u8; 11] = [
    0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x0e,
];

/// Builds a DER-encoded PKCS#10 CSR for `domain`, subject CN=domain and a
/// single non-critical `SAN=DNS:domain` extension, signed with `private_key`
/// under RSASSA-PKCS1-v1_5/SHA-256.
pub fn build_csr(domain: &str, private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    if domain.is_empty() {
        return Err(AcmeError::config("CSR domain must not be empty"));
    }

    let mut certification_request_info = Vec::new();
    certification_request_info.extend_from_slice(&[0x02, 0x01, 0x00]); // version 0
    certification_request_info.extend_from_slice(&build_subject(domain));
    certification_request_info.extend_from_slice(&build_rsa_spki(private_key)?);
    certification_request_info.extend_from_slice(&build_san_attribute(domain));
    let certification_request_info = wrap_sequence(&certification_request_info);

    let signature = sign_rs256(private_key, &certification_request_info)?;

    let mut csr = Vec::new();
    csr.extend_from_slice(&certification_request_info);
    csr.extend_from_slice(&wrap_sequence(&[&SHA256_WITH_RSA_OID[..], &[0x05, 0x00]].concat()));
    csr.extend_from_slice(&wrap_bit_string(&signature));
    Ok(wrap_sequence(&csr))
}

fn build_subject(cn: &str) -> Vec<u8> {
    let cn_bytes = cn.as_bytes();
    let mut cn_value = vec![0x0c]; // UTF8String
    encode_length(&mut cn_value, cn_bytes.len());
    cn_value.extend_from_slice(cn_bytes);

    let mut attribute_type_and_value = CN_OID.to_vec();
    attribute_type_and_value.extend_from_slice(&cn_value);
    let rdn = wrap_set(&wrap_sequence(&attribute_type_and_value));
    wrap_sequence(&rdn)
}

fn build_rsa_spki(private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let public_key = private_key.to_public_key();
    let rsa_public_key = wrap_sequence(
        &[
            encode_integer(&public_key.n().to_bytes_be()),
            encode_integer(&public_key.e().to_bytes_be()),
        ]
        .concat(),
    );

    let algorithm = wrap_sequence(&[&RSA_ENCRYPTION_OID[..], &[0x05, 0x00]].concat());
    let mut spki = algorithm;
    spki.extend_from_slice(&wrap_bit_string(&rsa_public_key));
    Ok(wrap_sequence(&spki))
}

fn build_san_attribute(domain: &str) -> Vec<u8> {
    let mut dns_name = vec![0x82]; // [2] IMPLICIT dNSName
    encode_length(&mut dns_name, domain.len());
    dns_name.extend_from_slice(domain.as_bytes());
    let san_extension_value = wrap_octet_string(&wrap_sequence(&dns_name));

    let mut extension = SAN_EXTENSION_OID.to_vec();
    extension.extend_from_slice(&san_extension_value);
    let extensions = wrap_sequence(&wrap_sequence(&extension));

    let mut attribute = EXTENSION_REQUEST_OID.to_vec();
    attribute.extend_from_slice(&wrap_set(&extensions));
    let attribute = wrap_sequence(&attribute);

    let mut attributes = vec![0xa0]; // [0] IMPLICIT Attributes
    encode_length(&mut attributes, attribute.len());
    attributes.extend_from_slice(&attribute);
    attributes
}

/// DER INTEGER, prefixed with a zero byte when the high bit is set so the
/// value is not misread as negative.
fn encode_integer(unsigned_be: &[u8]) -> Vec<u8> {
    let mut value = unsigned_be.to_vec();
    if value.is_empty() {
        value.push(0);
    }
    if value[0] & 0x80 != 0 {
        value.insert(0, 0x00);
    }
    let mut result = vec![0x02];
    encode_length(&mut result, value.len());
    result.extend_from_slice(&value);
    result
}

fn wrap_sequence(data: &[u8]) -> Vec<u8> {
    let mut result = vec![0x30];
    encode_length(&mut result, data.len());
    result.extend_from_slice(data);
    result
}

fn wrap_set(data: &[u8]) -> Vec<u8> {
    let mut result = vec![0x31];
    encode_length(&mut result, data.len());
    result.extend_from_slice(data);
    result
}

fn wrap_bit_string(data: &[u8]) -> Vec<u8> {
    let mut result = vec![0x03];
    encode_length(&mut result, data.len() + 1);
    result.push(0x00); // no unused bits
    result.extend_from_slice(data);
    result
}

fn wrap_octet_string(data: &[u8]) -> Vec<u8> {
    let mut result = vec![0x04];
    encode_length(&mut result, data.len());
    result.extend_from_slice(data);
    result
}

fn encode_length(output: &mut Vec<u8>, len: usize) {
    if len < 128 {
        output.push(len as u8);
    } else if len < 256 {
        output.push(0x81);
        output.push(len as u8);
    } else {
        output.push(0x82);
        output.push((len >> 8) as u8);
        output.push(len as u8);
    }
}
