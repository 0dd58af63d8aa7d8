//! `epi-engine` — the per-tick epidemic transition.
//!
//! # One tick
//!
//! ```text
//! for region in registry order (reading only the tick-start state):
//!   ① Seed       — the starting region gets its first case (once per run).
//!   ② Skip       — resolved regions are frozen; regions with no cases do
//!                  not spread.
//!   ③ Intra      — one transmission attempt, dampened by the region's
//!                  interventions; success adds 1–2 cases.
//!   ④ Cross      — above the significance threshold, one attempt per
//!                  neighbor within the radius; successes are buffered.
//!   ⑤ Vaccinate  — with vaccines available, shift infected and living
//!                  people straight to immune.
//!   ⑥ Resolve    — after the incubation window, a random share of cases
//!                  resolves to dead (lethality) or immune.
//! then:
//!   apply buffered cross-region arrivals
//!   ⑦ Normalise  — restore infected + immune + dead <= population.
//! ```
//!
//! [`TransitionEngine::step`] is a pure function of the state, the disease
//! and the random stream: it never mutates its input and never fails.

pub mod engine;
pub mod params;
pub mod state;


pub use engine::{TickReport, TransitionEngine};
pub use params::SpreadParams;
pub use state::SimulationState;
