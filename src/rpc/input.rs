use crate::error::Result;
use crate::query::ElementHandle;

/// Non-printing keys the engine needs to press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Return,
    Escape,
    Delete,
}

impl Key {
    /// Key name as understood by CDP `Input.dispatchKeyEvent`
    pub fn name(&self) -> &'static str {
        match self {
            Key::Tab => "Tab",
            Key::Return => "Enter",
            Key::Escape => "Escape",
            Key::Delete => "Delete",
        }
    }
}

/// Simulated user input delivered to the live UI
///
/// Every method delivers its event exactly once; callers own the ordering.
pub trait InputDevice {
    /// Move the pointer over the element
    fn move_to(&self, element: &ElementHandle) -> Result<()>;

    /// Left click the element
    fn click(&self, element: &ElementHandle) -> Result<()>;

    /// Right click the element to open its context menu
    fn context_click(&self, element: &ElementHandle) -> Result<()>;

    /// Clear any existing content of an input element
    fn clear(&self, element: &ElementHandle) -> Result<()>;

    /// Type a single character into the focused element
    fn send_char(&self, character: char) -> Result<()>;

    fn press_key(&self, key: Key) -> Result<()>;
}
