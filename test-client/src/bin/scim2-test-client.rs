// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::Parser;
use scim2_client::Client;
use scim2_client::disable_discovery;
use scim2_client::disable_etag;
use scim2_client::ignore_redirects;
use scim2_test_client::Tester;
use slog::Drain;
use slog::Logger;

#[derive(Debug, Parser)]
#[clap(about = "SCIM 2 test client")]
struct Args {
    /// The SCIM service URL. When omitted, the client is configured from the
    /// SCIM_* environment variables instead.
    #[clap(long)]
    url: Option<String>,

    #[clap(long)]
    disable_discovery: bool,

    /// Do not send If-Match preconditions
    #[clap(long)]
    disable_etag: bool,

    /// Report 3xx responses instead of following them
    #[clap(long)]
    ignore_redirects: bool,

    /// Log every request and response
    #[clap(long)]
    debug: bool,
}

fn logger(debug: bool) -> Logger {
    if !debug {
        return Logger::root(slog::Discard, slog::o!());
    }

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, slog::o!())
}

fn main() -> anyhow::Result<()> {
    let opt: Args = Args::try_parse()?;

    let client = match opt.url {
        Some(url) => Client::connect(
            &url,
            [
                disable_discovery(opt.disable_discovery),
                disable_etag(opt.disable_etag),
                ignore_redirects(opt.ignore_redirects),
            ],
        )?,

        None => Client::connect_from_env()?,
    };

    let tester = Tester::new(client.with_logger(logger(opt.debug)));

    tester.run()?;

    println!("SUCCESS");

    Ok(())
}
