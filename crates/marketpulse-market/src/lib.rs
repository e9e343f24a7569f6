//! Stock ingestion pipeline: fetch daily OHLCV bars for a ticker set from
//! the market-data provider, reshape the wide per-ticker response into one
//! long-format table, and optionally broadcast per-ticker fundamentals onto
//! every bar.
//!
//! A ticker the provider knows nothing about yields zero rows and a logged
//! notice, never an error; only transport failures or a globally malformed
//! response abort the fetch.

pub mod client;
pub mod error;
pub mod fetch;
pub mod types;

pub use client::MarketClient;
pub use error::FetchError;
pub use fetch::{fetch_enriched_stock_data, fetch_stock_data};
pub use types::{EnrichedBar, FundamentalsSnapshot, PriceBar};
