//! Expiry extraction from PEM certificate chains.

use thiserror::Error;
use x509_parser::pem::parse_x509_pem;

/// Expiry of one certificate in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateExpiry {
    /// Position in the PEM blob, starting at 0.
    pub index: usize,
    /// `notAfter` in seconds since the Unix epoch.
    pub not_after: i64,
}

/// A PEM blob could not be fully decoded.
///
/// `parsed` holds the certificates decoded before the failure.
#[derive(Debug, Clone, Error)]
#[error("Failed to decode certificate {index}: {reason}")]
pub struct CertificateDecodeError {
    pub index: usize,
    pub reason: String,
    pub parsed: Vec<CertificateExpiry>,
}

/// Decode every certificate of a PEM chain in order.
///
/// Decoding stops at the first block that is not a valid PEM-wrapped
/// X.509 certificate. An empty blob yields no certificates.
pub fn decode_chain(pem: &str) -> Result<Vec<CertificateExpiry>, CertificateDecodeError> {
    let mut parsed = Vec::new();
    let mut rest = pem.as_bytes().trim_ascii_start();

    while !rest.is_empty() {
        let index = parsed.len();

        let (remaining, block) = match parse_x509_pem(rest) {
            Ok(decoded) => decoded,
            Err(e) => {
                return Err(CertificateDecodeError {
                    index,
                    reason: format!("invalid PEM: {}", e),
                    parsed,
                });
            }
        };

        let not_after = match block.parse_x509() {
            Ok(cert) => cert.validity().not_after.timestamp(),
            Err(e) => {
                return Err(CertificateDecodeError {
                    index,
                    reason: format!("invalid X.509: {}", e),
                    parsed,
                });
            }
        };

        parsed.push(CertificateExpiry { index, not_after });
        rest = remaining.trim_ascii_start();
    }

    Ok(parsed)
}
