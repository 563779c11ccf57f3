mod bridge;
mod provider;
mod types;

pub use bridge::WalletBridge;
pub use provider::{ConfiguredProvider, ProviderError, WalletProvider};
pub use types::{UnknownWalletType, WalletInfo, WalletState, WalletType, WALLET_STATE_KEY};
