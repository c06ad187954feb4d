use std::{sync::OnceLock, time::Duration};

use reqwest::Client;
use tracing::debug;

/// Install the process-wide rustls crypto provider.
///
/// reqwest is built without a bundled provider, so this must run before the
/// first client is created.
pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Another crate installed one first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// Client without a request timeout.
///
/// Fails instead of panicking when the TLS backend cannot be initialized.
pub fn default_client() -> reqwest::Result<Client> {
    build_client(Duration::ZERO)
}

/// Client for hosts that bound every notification request.
///
/// A zero `request_timeout` leaves requests unbounded.
pub fn build_client(request_timeout: Duration) -> reqwest::Result<Client> {
    install_rustls_provider();

    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if request_timeout > Duration::ZERO {
        builder = builder.timeout(request_timeout);
    }
    builder.build()
}
