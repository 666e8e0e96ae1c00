/// Certificate chain parsing and PEM bundle assembly.
use crate::error::{AcmeError, Result};
use pem::parse_many;
use x509_parser::asn1_rs::FromDer;
use x509_parser::certificate::X509Certificate;
use x509_parser::prelude::GeneralName;
use x509_parser::prelude::ParsedExtension;

/// A leaf certificate plus whatever intermediates were bundled alongside it.
#[derive(Debug, Clone)]
pub struct CertificateChain {
    /// The leaf certificate (first in chain), DER-encoded.
    pub leaf: Vec<u8>,
    /// Intermediate certificates, DER-encoded, in the order served.
    pub intermediates: Vec<Vec<u8>>,
}

impl CertificateChain {
    /// Splits a PEM bundle (as returned by the authority) into leaf + intermediates.
    pub fn from_pem(pem_data: &[u8]) -> Result<Self> {
        let mut certs = Vec::new();
        for p in parse_many(pem_data)
            .map_err(|e| AcmeError::crypto(format!("failed to parse PEM: {e}")))?
        {
            if p.tag() == "CERTIFICATE" {
                certs.push(p.contents().to_vec());
            }
        }

        if certs.is_empty() {
            return Err(AcmeError::crypto("no certificates found in PEM data"));
        }

        let leaf = certs.remove(0);
        Ok(Self {
            leaf,
            intermediates: certs,
        })
    }

    /// Re-encodes the chain as a PEM bundle: the leaf wrapped at 64 columns,
    /// followed by each intermediate in the order held.
    pub fn to_pem_bundle(&self) -> String {
        let mut bundle = crate::crypto::PemEncoding::encode(&self.leaf, "CERTIFICATE");
        for intermediate in &self.intermediates {
            bundle.push_str(&crate::crypto::PemEncoding::encode(intermediate, "CERTIFICATE"));
        }
        bundle
    }

    /// Parses the leaf far enough to confirm it is a well-formed X.509 certificate.
    pub fn verify(&self) -> Result<()> {
        X509Certificate::from_der(&self.leaf)
            .map_err(|e| AcmeError::crypto(format!("invalid leaf certificate: {e}")))?;
        for (i, cert_der) in self.intermediates.iter().enumerate() {
            X509Certificate::from_der(cert_der)
                .map_err(|e| AcmeError::crypto(format!("invalid intermediate certificate {i}: {e}")))?;
        }
        Ok(())
    }

    /// The leaf certificate's Subject Common Name.
    pub fn common_name(&self) -> Result<String> {
        let (_, cert) = X509Certificate::from_der(&self.leaf)
            .map_err(|e| AcmeError::crypto(format!("invalid leaf certificate: {e}")))?;
        for rdn in cert.subject().iter_common_name() {
            if let Ok(cn) = rdn.as_str() {
                return Ok(cn.to_string());
            }
        }
        Err(AcmeError::crypto("no Common Name found in certificate"))
    }

    /// The leaf certificate's DNS Subject Alternative Names.
    pub fn subject_alt_names(&self) -> Result<Vec<String>> {
        let (_, cert) = X509Certificate::from_der(&self.leaf)
            .map_err(|e| AcmeError::crypto(format!("invalid leaf certificate: {e}")))?;

        let mut sans = Vec::new();
        for ext in cert.extensions() {
            if let ParsedExtension::SubjectAlternativeName(san_ext) = ext.parsed_extension() {
                for name in &san_ext.general_names {
                    if let GeneralName::DNSName(dns) = name {
                        sans.push(dns.to_string());
                    }
                }
            }
        }
        Ok(sans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_signed_pem(domain: &str) -> String {
        let key_pair = rcgen::KeyPair::generate().unwrap();
        let params = rcgen::CertificateParams::new(vec![domain.to_string()]).unwrap();
        params.self_signed(&key_pair).unwrap().pem()
    }

    #[test]
    fn parses_leaf_and_has_no_intermediates_for_a_single_cert_pem() {
        let pem = self_signed_pem("example.com");
        let chain = CertificateChain::from_pem(pem.as_bytes()).unwrap();
        assert!(!chain.leaf.is_empty());
        assert!(chain.intermediates.is_empty());
        assert_eq!(chain.common_name().unwrap(), "example.com");
        assert_eq!(chain.subject_alt_names().unwrap(), vec!["example.com"]);
    }

    #[test]
    fn to_pem_bundle_wraps_leaf_at_64_columns() {
        let pem = self_signed_pem("example.com");
        let chain = CertificateChain::from_pem(pem.as_bytes()).unwrap();
        let bundle = chain.to_pem_bundle();
        for line in bundle.lines() {
            if line.starts_with("-----") {
                continue;
            }
            assert!(line.len() <= 64, "line longer than 64 columns: {line}");
        }
    }

    #[test]
    fn rejects_pem_with_no_certificates() {
        let err = CertificateChain::from_pem(b"").unwrap_err();
        assert!(matches!(err, AcmeError::Crypto(_)));
    }
}
