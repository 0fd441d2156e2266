//! The synchronization engine
//!
//! This module provides:
//! - poller: the timeout-bounded condition poller every wait is built on
//! - store: load-counter tracking and the quiet-period gate
//! - field / form: the value-assignment state machine and form-level helpers
//! - tree: node accessors and the lazy-load retry protocol
//! - grid / controls: column headers, buttons, message boxes and menu items
//! - keyboard: character-by-character typing and special keys
//!
//! All components are thin views over a shared [`Context`] and hold no state of their
//! own; every call observes the live UI afresh.

pub mod config;
pub mod controls;
pub mod field;
pub mod form;
pub mod grid;
pub mod keyboard;
pub mod matching;
pub mod poller;
pub mod store;
pub mod tree;

pub use config::{QuietPeriod, SyncConfig, TypingOptions, WaitOptions};
pub use controls::{Buttons, Menus};
pub use field::{AssignStrategy, FieldController, FieldDescriptor, FieldInfo, FieldKind, ValueSpec};
pub use form::FormFiller;
pub use grid::GridNavigator;
pub use keyboard::{Keyboard, TypeOptions};
pub use store::{ResetOutcome, StoreTracker};
pub use tree::{NodePart, TreeNavigator};

use crate::query::QueryEvaluator;
use crate::rpc::{InputDevice, UiOracle};

/// Everything an engine component needs: the helper oracle, the input channel and timings
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub oracle: &'a dyn UiOracle,
    pub input: &'a dyn InputDevice,
    pub config: &'a SyncConfig,
}

impl<'a> Context<'a> {
    pub fn new(oracle: &'a dyn UiOracle, input: &'a dyn InputDevice, config: &'a SyncConfig) -> Self {
        Self { oracle, input, config }
    }
}

/// Owns a UI backend and its timings, handing out engine components on demand
///
/// ```ignore
/// let driver = ExtDriver::new(backend, SyncConfig::default());
/// let pets = FieldDescriptor::new("form#pets", "species");
/// driver.fields().set_field_value(&pets, &ValueSpec::from("Cat"))?;
/// ```
pub struct ExtDriver<B> {
    backend: B,
    config: SyncConfig,
}

impl<B: UiOracle + InputDevice> ExtDriver<B> {
    pub fn new(backend: B, config: SyncConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Builder method: replace the timings
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(&self) -> Context<'_> {
        Context::new(&self.backend, &self.backend, &self.config)
    }

    pub fn query(&self) -> QueryEvaluator<'_> {
        QueryEvaluator::new(self.context())
    }

    pub fn stores(&self) -> StoreTracker<'_> {
        StoreTracker::new(self.context())
    }

    pub fn fields(&self) -> FieldController<'_> {
        FieldController::new(self.context())
    }

    pub fn forms(&self) -> FormFiller<'_> {
        FormFiller::new(self.context())
    }

    pub fn trees(&self) -> TreeNavigator<'_> {
        TreeNavigator::new(self.context())
    }

    pub fn grids(&self) -> GridNavigator<'_> {
        GridNavigator::new(self.context())
    }

    pub fn buttons(&self) -> Buttons<'_> {
        Buttons::new(self.context())
    }

    pub fn menus(&self) -> Menus<'_> {
        Menus::new(self.context())
    }

    pub fn keyboard(&self) -> Keyboard<'_> {
        Keyboard::new(self.context())
    }
}
