// Entrypoint for the CLI application.
// - Keeps `main` small: set up diagnostics, locate the token store and
//   hand control to the UI loop.
// - Returns `anyhow::Result` so any setup failure prints its chain.

use gitflock_cli::{session::TokenStore, ui::main_menu};

fn main() -> anyhow::Result<()> {
    // Quiet by default; RUST_LOG overrides (e.g. RUST_LOG=gitflock_cli=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let store = TokenStore::default_location();

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(&store)
}
