// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// A provider running on an ephemeral port for the duration of a test.
///
/// The runtime's worker threads serve requests, which leaves the calling
/// thread free to use blocking clients against `url`.
pub struct TestProvider {
    runtime: tokio::runtime::Runtime,
    server: Option<HttpServer<Arc<ServerContext>>>,
    pub url: String,
}

impl TestProvider {
    pub fn start() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let log = Logger::root(slog::Discard, slog::o!());
        let bind_address = SocketAddr::from(([127, 0, 0, 1], 0));

        let server = runtime
            .block_on(async move { create_http_server(log, bind_address) })?;

        let url = format!("http://{}/v2", server.local_addr());

        Ok(Self { runtime, server: Some(server), url })
    }
}

impl Drop for TestProvider {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            let _ = self.runtime.block_on(server.close());
        }
    }
}
