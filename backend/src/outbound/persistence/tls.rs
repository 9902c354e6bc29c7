//! TLS connector that accepts any server certificate.
//!
//! Managed PostgreSQL hosts commonly present certificates signed by a private
//! authority. When `PGSSL_ALLOW_INVALID_CERTS` is set, the pool negotiates TLS
//! but skips chain and host name validation. Handshake signatures are still
//! checked so the session keys belong to the presented certificate.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio_postgres_rustls::MakeRustlsConnect;

#[derive(Debug)]
struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Build a `tokio-postgres` TLS connector with certificate validation off.
///
/// # Errors
///
/// Returns [`rustls::Error`] when the crypto provider offers no usable
/// protocol version.
pub(crate) fn unverified_connector() -> Result<MakeRustlsConnect, rustls::Error> {
    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
        .with_no_client_auth();
    Ok(MakeRustlsConnect::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connector_builds_with_default_provider() {
        assert!(unverified_connector().is_ok());
    }

    #[rstest]
    fn verifier_accepts_arbitrary_certificates() {
        let verifier = AcceptAnyServerCert {
            provider: Arc::new(rustls::crypto::aws_lc_rs::default_provider()),
        };
        let cert = CertificateDer::from(vec![0_u8; 4]);
        let name = ServerName::try_from("db.example.invalid").expect("valid name");

        let verdict = verifier.verify_server_cert(&cert, &[], &name, &[], UnixTime::now());

        assert!(verdict.is_ok());
        assert!(!verifier.supported_verify_schemes().is_empty());
    }
}
