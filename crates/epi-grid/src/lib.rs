//! `epi-grid` — the spatial substrate agents live on.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`position`]  | `Position` — integer cell coordinates                    |
//! | [`grid`]      | `MultiGrid` — toroidal grid, many agents per cell        |
//! | [`error`]     | `GridError`, `GridResult<T>`                             |
//!
//! # Ownership
//!
//! The grid never owns agents.  It keeps a denormalized index
//! (cell → ordered list of `AgentId`s, plus `AgentId` → cell) that the
//! population keeps in step with each agent's recorded position.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                          |
//! |---------|-------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Position`. |

pub mod error;
pub mod grid;
pub mod position;


pub use error::{GridError, GridResult};
pub use grid::MultiGrid;
pub use position::Position;
