// PrefixSpan sequential pattern mining
//
// Finds every ordered item sequence that occurs, not necessarily
// contiguously, in at least `min_support` of the database's sequences.
//
// Scientific Foundation:
// [1] Pei, J., Han, J., Mortazavi-Asl, B., Pinto, H., Chen, Q., Dayal, U., &
//     Hsu, M. C. (2001). PrefixSpan: Mining sequential patterns efficiently by
//     prefix-projected pattern growth. ICDE.
//
// Key Insight: support is anti-monotone. Extending a pattern can never raise
// the number of sequences containing it, so an infrequent prefix ends its
// whole subtree. Projections are (sequence, offset) pointers into the shared
// arena (pseudo-projection); no suffix is ever copied.

mod cancel;
mod collector;
mod frequent;
mod miner;
mod projection;

pub use cancel::CancellationToken;
pub use collector::{LengthSummary, MiningReport, Pattern, ResultCollector};
pub use frequent::{find_frequent_items, min_support_count, order_by_support, SupportCounter};
pub use miner::{mine, PatternMiner};
pub use projection::{ProjectedDatabase, ProjectionPointer};
