#![allow(dead_code)]

use ext_driver::sync::{ExtDriver, QuietPeriod, SyncConfig, TypingOptions, WaitOptions};
use ext_driver::{ElementHandle, HelperCall, InputDevice, Key, Result, UiOracle};
use serde_json::Value;
use std::cell::RefCell;

/// Everything the engine did to the fake UI, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Helper(HelperCall),
    Move(String),
    Click(String),
    ContextClick(String),
    Clear(String),
    Char(char),
    Key(Key),
}

impl Event {
    pub fn is_input(&self) -> bool {
        !matches!(self, Event::Helper(_))
    }

    pub fn helper_name(&self) -> Option<&'static str> {
        match self {
            Event::Helper(call) => Some(call.name()),
            _ => None,
        }
    }
}

type Handler = Box<dyn FnMut(&HelperCall, &[Event]) -> Value>;

/// A scripted UI: helper calls are answered by a handler that can see every earlier event
pub struct FakeUi {
    handler: RefCell<Handler>,
    events: RefCell<Vec<Event>>,
}

impl FakeUi {
    pub fn new(handler: impl FnMut(&HelperCall, &[Event]) -> Value + 'static) -> Self {
        Self { handler: RefCell::new(Box::new(handler)), events: RefCell::new(Vec::new()) }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn input_events(&self) -> Vec<Event> {
        self.events.borrow().iter().filter(|event| event.is_input()).cloned().collect()
    }

    pub fn helper_calls(&self) -> Vec<HelperCall> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Helper(call) => Some(call.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn helper_names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().filter_map(Event::helper_name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.helper_names().into_iter().filter(|called| *called == name).count()
    }

    /// Position of the first event matching `predicate`
    pub fn position(&self, predicate: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(predicate)
    }

    pub fn typed(&self) -> String {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Char(character) => Some(*character),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) -> Result<()> {
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl UiOracle for FakeUi {
    fn call(&self, call: &HelperCall) -> Result<Value> {
        let value = {
            let events = self.events.borrow();
            let mut handler = self.handler.borrow_mut();
            handler(call, &events)
        };

        self.record(Event::Helper(call.clone()))?;
        Ok(value)
    }
}

impl InputDevice for FakeUi {
    fn move_to(&self, element: &ElementHandle) -> Result<()> {
        self.record(Event::Move(element.dom_id().to_string()))
    }

    fn click(&self, element: &ElementHandle) -> Result<()> {
        self.record(Event::Click(element.dom_id().to_string()))
    }

    fn context_click(&self, element: &ElementHandle) -> Result<()> {
        self.record(Event::ContextClick(element.dom_id().to_string()))
    }

    fn clear(&self, element: &ElementHandle) -> Result<()> {
        self.record(Event::Clear(element.dom_id().to_string()))
    }

    fn send_char(&self, character: char) -> Result<()> {
        self.record(Event::Char(character))
    }

    fn press_key(&self, key: Key) -> Result<()> {
        self.record(Event::Key(key))
    }
}

/// Characters typed since the most recent call to the helper named `name`
pub fn chars_since(events: &[Event], name: &str) -> usize {
    let start = events.iter().rposition(|event| event.helper_name() == Some(name)).map_or(0, |i| i + 1);
    events[start..].iter().filter(|event| matches!(event, Event::Char(_))).count()
}

/// Calls to the helper named `name` so far
pub fn calls_to(events: &[Event], name: &str) -> usize {
    events.iter().filter(|event| event.helper_name() == Some(name)).count()
}

/// Short timings so failing waits fail fast
pub fn fast_config() -> SyncConfig {
    SyncConfig {
        component_wait: WaitOptions::new(500, 5),
        store_load_wait: WaitOptions::new(500, 5),
        quiet_period: QuietPeriod { enabled: true, timeout_ms: 500, poll_interval_ms: 5, recheck_ms: 1 },
        tree_idle_wait: WaitOptions::new(500, 5),
        tree_recheck_ms: 1,
        node_wait: WaitOptions::new(500, 5),
        focus_wait: WaitOptions::new(500, 5),
        typing: TypingOptions { realistic: false, ..TypingOptions::default() },
        helper_load_wait: WaitOptions::new(500, 5),
    }
}

pub fn driver(ui: FakeUi) -> ExtDriver<FakeUi> {
    ExtDriver::new(ui, fast_config())
}
