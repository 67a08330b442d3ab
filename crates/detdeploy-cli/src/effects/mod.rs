//! Post-deployment effect handlers
//!
//! - [`GithubOutput`] - exposes the address as a GitHub Actions output
//! - [`AddressTable`] - prints the address in the console
//! - [`EtherscanVerification`] - verifies the source through forge

mod github;
mod table;
mod verify;

pub use github::{output_key, GithubOutput};
pub use table::AddressTable;
pub use verify::EtherscanVerification;
