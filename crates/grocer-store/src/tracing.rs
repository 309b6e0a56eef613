//! # Logging Setup
//!
//! Stores log `info` for lifecycle and mutations, `debug` for reads and full payloads.
//! The verbosity comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run            # store lifecycle, screen cycles
//! RUST_LOG=debug cargo run           # request payloads, discarded results
//! RUST_LOG=grocer::view=debug cargo run
//! ```
//!
//! Typical `info` output while the storefront boots and a customer checks out:
//!
//! ```text
//! INFO Store started record_type="Category"
//! INFO Created record_type="Category" id=category_1 size=1
//! INFO screen="category" cycle=1 key="fruits" Fetch started
//! INFO screen="category" cycle=1 Ready
//! INFO Action ok record_type="Product" id=product_3
//! INFO Created record_type="Order" id=order_1 size=1
//! ```

/// Installs the global `tracing` subscriber: `RUST_LOG` filtering, compact lines, no
/// module targets (`record_type` and `screen` fields say where a line came from).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
