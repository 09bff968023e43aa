//! Storefront Catalog - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    if let Err(e) = storefront_catalog::run().await {
        eprintln!("storefront-catalog: {e}");
        std::process::exit(1);
    }
}
