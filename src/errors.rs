use thiserror::Error;
use solana_client::client_error::ClientError;
use solana_sdk::program_error::ProgramError;
use solana_sdk::pubkey::ParsePubkeyError;
use solana_sdk::signature::SignerError;

#[derive(Error, Debug)]
pub enum SimError {
    /// The offered SOL buys less than one smallest unit at the given price.
    #[error("Insufficient input: {0}")]
    InsufficientInput(String),

    /// Negative, fractional or overflowing quantity at a parsing or arithmetic boundary.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Cannot allocate {0} units across an empty target list")]
    EmptyTargets(u64),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Solana client error: {0}")]
    SolanaClient(#[from] ClientError),

    #[error("Solana program error: {0}")]
    SolanaProgram(#[from] ProgramError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Pubkey parse error: {0}")]
    PubkeyParse(#[from] ParsePubkeyError),

    #[error("BS58 decode error: {0}")]
    Bs58Decode(#[from] bs58::decode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
