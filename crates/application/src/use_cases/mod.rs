pub mod doh;

pub use doh::{HandleDohRequestUseCase, ResolutionOutcome, ResolveQueryUseCase};
