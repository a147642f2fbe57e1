use crate::model::{Filter, Task};

use http::{Request, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use rustls_native_certs;
use std::sync::Arc;

type HttpClient = Client<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    String,
>;

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, insecure: bool) -> Result<Self, String> {
        let uri: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| e.to_string())?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(format!("Base URL needs a scheme and host: {}", base_url));
        }

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            if root_store.is_empty() {
                return Err("No valid system certificates found.".to_string());
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let client = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page of tasks. The server returns a bare JSON array of
    /// task objects; any non-2xx status or malformed body is an error and
    /// the caller keeps whatever it was showing.
    pub async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        filter: &Filter,
    ) -> Result<Vec<Task>, String> {
        let url = format!(
            "{}/tasks?page={}&limit={}{}",
            self.base_url,
            page,
            limit,
            filter.query_suffix()
        );
        let uri: Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| e.to_string())?;

        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(String::new())
            .map_err(|e| e.to_string())?;

        let response = self
            .client
            .request(req)
            .await
            .map_err(|e| format!("GET /tasks: {}", e))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| format!("Reading body: {}", e))?
            .to_bytes();

        if !status.is_success() {
            return Err(format!("HTTP {} fetching page {}", status, page));
        }

        serde_json::from_slice::<Vec<Task>>(&body)
            .map_err(|e| format!("Malformed task payload: {}", e))
    }
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}
