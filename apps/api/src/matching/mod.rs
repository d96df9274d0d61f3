// The match pipeline: session context, ranking policy, HTTP handlers.
// Provider access goes through jobsource — no direct API calls here.

pub mod handlers;
pub mod ranker;
pub mod session;
