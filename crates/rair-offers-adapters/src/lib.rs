pub mod config;
pub mod diamond;
pub mod wallet;

pub use config::OfferAdapterConfig;
pub use diamond::DiamondAbiAdapter;
pub use wallet::WalletAdapter;
