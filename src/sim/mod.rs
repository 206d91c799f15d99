//! The simulation core
//!
//! All pet behavior lives here: species transition graphs, the per-tick
//! creature engine, ball physics, and the scheduler that ties them
//! together each frame. No rendering or platform dependencies - the host
//! drives [`Scheduler::tick`] once per display frame and reads entity
//! state back.

pub mod ball;
pub mod creature;
pub mod scheduler;
pub mod species;
pub mod states;

pub use ball::Ball;
pub use creature::{Creature, CreatureId, Speech};
pub use scheduler::{Scheduler, SpawnError, SpawnRequest, TickContext};
pub use species::{PetColor, PetSize, SpeciesDescriptor, SpeciesKind, TransitionGraph};
pub use states::{FrameResult, HorizontalDirection, StateBehavior, States};
