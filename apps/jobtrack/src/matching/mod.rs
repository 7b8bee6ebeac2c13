// Résumé matcher: the pluggable Matcher Service seam, the controller that
// owns one analyze cycle at a time, the cancellable score counter, and the
// pure result projection.

pub mod animation;
pub mod controller;
pub mod scorer;
pub mod view;

pub use controller::{MatchController, MatchState};
pub use scorer::{KeywordMatcher, MatcherService};
pub use view::render_match;
