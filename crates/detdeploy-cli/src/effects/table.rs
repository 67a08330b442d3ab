use async_trait::async_trait;
use console::style;
use detdeploy_core::{DeploymentEffect, DeploymentResult, EffectKind, Result};

/// Prints a `name | address` table for the deployed contract
#[derive(Debug, Default, Clone)]
pub struct AddressTable;

impl AddressTable {
    pub fn new() -> Self {
        Self
    }

    pub fn render(deployment: &DeploymentResult) -> String {
        let address = deployment.address_string();
        let name_width = deployment.contract_name.len().max("name".len());
        let address_width = address.len();

        let border = |left: &str, mid: &str, right: &str| {
            format!(
                "{}{}{}{}{}",
                left,
                "─".repeat(name_width + 2),
                mid,
                "─".repeat(address_width + 2),
                right
            )
        };

        [
            border("┌", "┬", "┐"),
            format!(
                "│ {:<nw$} │ {:<aw$} │",
                "name",
                "address",
                nw = name_width,
                aw = address_width
            ),
            border("├", "┼", "┤"),
            format!(
                "│ {:<nw$} │ {:<aw$} │",
                deployment.contract_name,
                address,
                nw = name_width,
                aw = address_width
            ),
            border("└", "┴", "┘"),
        ]
        .join("\n")
    }
}

#[async_trait]
impl DeploymentEffect for AddressTable {
    fn kind(&self) -> EffectKind {
        EffectKind::PrintAddress
    }

    async fn apply(&self, deployment: &DeploymentResult) -> Result<()> {
        println!();
        println!("{}", style(Self::render(deployment)).cyan());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, B256};

    #[test]
    fn test_render_table() {
        let deployment = DeploymentResult {
            contract_name: "CeaErc20".to_string(),
            address: address!("1111111111111111111111111111111111111111"),
            tx_hash: B256::ZERO,
            block_number: Some(1),
        };

        let table = AddressTable::render(&deployment);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[3],
            "│ CeaErc20 │ 0x1111111111111111111111111111111111111111 │"
        );
        assert!(lines[1].starts_with("│ name     │ address"));
        // Every row has the same display width
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_render_short_name_pads_header() {
        let deployment = DeploymentResult {
            contract_name: "A".to_string(),
            address: address!("2222222222222222222222222222222222222222"),
            tx_hash: B256::ZERO,
            block_number: None,
        };

        let table = AddressTable::render(&deployment);
        assert!(table.contains("│ A    │"));
    }
}
