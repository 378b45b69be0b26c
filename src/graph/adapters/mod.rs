//! Borrowing views that re-present a wrapped graph under another contract.

pub mod bidirectional_adapter;
pub mod reversed;

pub use bidirectional_adapter::BidirectionalAdapter;
pub use reversed::ReversedBidirectionalGraph;
