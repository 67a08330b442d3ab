use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use detdeploy_core::{DeploymentEffect, DeploymentResult, EffectKind, Error, Result};

/// Environment variable holding the path of the GitHub Actions output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Where the output is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Append `key=value` to the runner's output file
    File(PathBuf),
    /// Legacy `::set-output` workflow command on stdout
    Stdout,
}

/// Sets the deployed address as a GitHub Actions step output
#[derive(Debug, Clone)]
pub struct GithubOutput {
    key: String,
    target: OutputTarget,
}

impl GithubOutput {
    /// Target the file named by `GITHUB_OUTPUT`, or stdout when unset
    pub fn from_env(key: impl Into<String>) -> Self {
        let target = match std::env::var_os(GITHUB_OUTPUT_ENV) {
            Some(path) if !path.is_empty() => OutputTarget::File(PathBuf::from(path)),
            _ => OutputTarget::Stdout,
        };
        Self::new(key, target)
    }

    pub fn new(key: impl Into<String>, target: OutputTarget) -> Self {
        Self {
            key: key.into(),
            target,
        }
    }
}

#[async_trait]
impl DeploymentEffect for GithubOutput {
    fn kind(&self) -> EffectKind {
        EffectKind::SetOutput
    }

    async fn apply(&self, deployment: &DeploymentResult) -> Result<()> {
        if self.key.is_empty() || self.key.contains(['\n', '\r', '=']) {
            return Err(Error::effect(
                self.kind(),
                format!("invalid output name '{}'", self.key),
            ));
        }

        let value = deployment.address_string();

        match &self.target {
            OutputTarget::File(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| Error::effect(self.kind(), format!("{}: {}", path.display(), e)))?;
                writeln!(file, "{}", output_line(&self.key, &value))
                    .map_err(|e| Error::effect(self.kind(), e))?;
            }
            OutputTarget::Stdout => {
                println!("{}", set_output_command(&self.key, &value));
            }
        }

        Ok(())
    }
}

/// Line appended to the `GITHUB_OUTPUT` file
pub fn output_line(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Legacy workflow command for runners without `GITHUB_OUTPUT`
pub fn set_output_command(key: &str, value: &str) -> String {
    format!("::set-output name={}::{}", key, value)
}

/// Output name for a contract: kebab-case of its name (`CeaErc20` -> `cea-erc20`)
pub fn output_key(contract_name: &str) -> String {
    let chars: Vec<char> = contract_name.chars().collect();
    let mut key = String::with_capacity(chars.len() + 4);

    for (i, c) in chars.iter().enumerate() {
        if *c == '_' || *c == ' ' {
            if !key.is_empty() && !key.ends_with('-') {
                key.push('-');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !key.ends_with('-') {
                key.push('-');
            }
        }

        key.extend(c.to_lowercase());
    }

    key
}
