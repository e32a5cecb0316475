pub mod balance;
pub mod transaction;

pub use balance::{format_sol, format_token_amount, get_sol_balance, get_token_balance};
pub use transaction::{build_batch_instructions, wait_for_confirmation};

/// Solana explorer URL for an address or transaction on `cluster`.
pub fn explorer_link(kind: &str, id: &str, cluster: &str) -> String {
    match cluster {
        "mainnet-beta" => format!("https://explorer.solana.com/{}/{}", kind, id),
        "localnet" => format!(
            "https://explorer.solana.com/{}/{}?cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899",
            kind, id
        ),
        other => format!("https://explorer.solana.com/{}/{}?cluster={}", kind, id, other),
    }
}

#[cfg(test)]
mod tests {
    use super::explorer_link;

    #[test]
    fn explorer_links_carry_the_cluster() {
        assert_eq!(
            explorer_link("tx", "abc", "devnet"),
            "https://explorer.solana.com/tx/abc?cluster=devnet"
        );
        assert_eq!(explorer_link("address", "abc", "mainnet-beta"), "https://explorer.solana.com/address/abc");
        assert!(explorer_link("tx", "abc", "localnet").contains("customUrl"));
    }
}
