//! studyhall-cli
//!
//! HTTP boundary for the question-answering engine (`server`), argument
//! parsing for the CLI (`cli`), and the `studyhall` and `studyhall-server`
//! binaries.

pub mod cli;
pub mod server;

/// Install the fmt subscriber. `RUST_LOG` wins over `default_directives`.
pub fn init_tracing(default_directives: &[&str]) -> anyhow::Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        for directive in default_directives {
            filter = filter.add_directive(directive.parse()?);
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
