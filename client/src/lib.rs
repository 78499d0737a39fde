//! Alchemist Pong client
//!
//! Drives one match at display rate: pointer in, draw list out, and the
//! rule regeneration round trip between points.

pub mod alchemist;
pub mod config;
pub mod controller;
pub mod fsm;
pub mod input;
pub mod mesh;
pub mod render_loop;
pub mod renderer;

pub use alchemist::{LocalAlchemist, RuleGenerator};
pub use config::{ClientConfig, RegenerateOn};
pub use controller::{FrameReport, MatchController, ModificationRecord, RequestTicket, ResponseOutcome};
pub use fsm::{FsmState, GameAction, GameFsm};
pub use input::PointerInput;
pub use render_loop::{FrameHandle, FrameScheduler, IntervalScheduler, RenderLoop};
pub use renderer::{Color, DrawCommand, RecordingSurface, Surface, Theme};
