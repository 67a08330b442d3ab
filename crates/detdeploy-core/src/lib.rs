pub mod bytecode;
pub mod client;
pub mod dispatcher;
pub mod effect;
pub mod error;
pub mod proxy;
pub mod types;

pub use bytecode::Bytecode;
pub use client::{ChainClient, ConfirmationWait, ProviderClient, SentTransaction};
pub use dispatcher::Dispatcher;
pub use effect::DeploymentEffect;
pub use error::{Error, Result};
pub use proxy::{DeterministicProxy, DETERMINISTIC_DEPLOYMENT_PROXY_ADDRESS};
pub use types::*;
