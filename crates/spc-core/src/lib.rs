//! Dashboard shell core: configuration, state-to-DOM reconciliation, the
//! card drag engine and the command-level shell controller.

pub mod config;
pub mod drag;
pub mod reconcile;
pub mod shell;

pub use config::{ShellConfig, ToastDurations};
pub use drag::{CardGrid, CardHandle, DragEngine, DragState, StackedGrid};
pub use reconcile::{Display, MemorySurface, MissingTarget, Mutation, Patch, Surface, Target};
pub use shell::{DemoAction, Effect, Layout, ProfileForm, Shell, ValidationError};
