//! Post-deployment effect handlers
//!
//! Each optional side effect of a deployment (CI output, console table,
//! explorer verification) is a separate [`DeploymentEffect`]. The dispatcher
//! runs the handlers whose [`EffectKind`] the request enables, in
//! [`EffectKind::ALL`] order, and stops at the first failure.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DeploymentResult, EffectKind};

#[async_trait]
pub trait DeploymentEffect: Send + Sync {
    /// The request flag that switches this handler on
    fn kind(&self) -> EffectKind;

    async fn apply(&self, deployment: &DeploymentResult) -> Result<()>;
}
