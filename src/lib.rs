// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive
// dashboard.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the GitHub REST API
//   behind the `FollowApi` trait.
// - `discovery`: Random-sampling candidate search with deduplication
//   and an attempt ceiling.
// - `orchestrator`: The sequential bulk follow / unfollow loops,
//   owning the action log and stat counters.
// - `log`: Action records, the capped action log and the counters.
// - `pacing`: The fixed-delay throttling policy between calls.
// - `session`: Token persistence and the login/logout transitions.
// - `ui`: The terminal front-end; delegates everything else.
pub mod api;
pub mod discovery;
pub mod log;
pub mod orchestrator;
pub mod pacing;
pub mod session;
pub mod ui;
