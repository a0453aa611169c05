// ── In-process stores ──
//
// Process-lifetime memoization for catalog responses.

mod clock;
mod search_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use search_cache::SearchCache;
