use crate::error::Result;
use crate::query::ElementHandle;
use crate::rpc::Key;
use crate::sync::Context;
use rand::Rng;
use std::thread;
use std::time::Duration;

/// Options for [`Keyboard::type_into_element`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeOptions {
    /// Clear the element before typing
    pub clear_first: bool,

    /// Pause after typing
    pub delay: Option<Duration>,

    /// Press Tab after typing (and after the delay)
    pub tab_off: bool,

    /// Override the configured realistic typing pauses
    pub realistic: Option<bool>,
}

impl Default for TypeOptions {
    fn default() -> Self {
        Self { clear_first: true, delay: None, tab_off: false, realistic: None }
    }
}

impl TypeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: press Tab once typing is done
    pub fn tab_off(mut self, tab_off: bool) -> Self {
        self.tab_off = tab_off;
        self
    }

    /// Builder method: pause after typing
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Builder method: force realistic typing on or off
    pub fn realistic(mut self, realistic: bool) -> Self {
        self.realistic = Some(realistic);
        self
    }

    /// Builder method: whether to clear existing content first
    pub fn clear_first(mut self, clear_first: bool) -> Self {
        self.clear_first = clear_first;
        self
    }
}

/// Types into elements the way a user would
pub struct Keyboard<'a> {
    ctx: Context<'a>,
}

impl<'a> Keyboard<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Focus `element` with the pointer and type `text` into it
    ///
    /// Events go out in a fixed order: clear, move, click, one event per character,
    /// the optional delay, then the optional Tab.
    pub fn type_into_element(&self, element: &ElementHandle, text: &str, options: TypeOptions) -> Result<()> {
        let input = self.ctx.input;

        if options.clear_first {
            input.clear(element)?;
        }

        input.move_to(element)?;
        input.click(element)?;

        self.type_text(text, options.realistic.unwrap_or(self.ctx.config.typing.realistic))?;

        if let Some(delay) = options.delay {
            thread::sleep(delay);
        }

        if options.tab_off {
            self.type_tab(None)?;
        }

        Ok(())
    }

    /// Type `text` into the currently focused element, one key event per character
    pub fn type_text(&self, text: &str, realistic: bool) -> Result<()> {
        for character in text.chars() {
            self.ctx.input.send_char(character)?;

            if realistic {
                thread::sleep(self.random_pause());
            }
        }

        Ok(())
    }

    pub fn type_tab(&self, pause: Option<Duration>) -> Result<()> {
        self.press(Key::Tab, pause)
    }

    pub fn type_return(&self, pause: Option<Duration>) -> Result<()> {
        self.press(Key::Return, pause)
    }

    pub fn type_escape(&self, pause: Option<Duration>) -> Result<()> {
        self.press(Key::Escape, pause)
    }

    pub fn type_delete(&self, pause: Option<Duration>) -> Result<()> {
        self.press(Key::Delete, pause)
    }

    /// Press `key`, then pause for `pause` or a random realistic interval
    fn press(&self, key: Key, pause: Option<Duration>) -> Result<()> {
        self.ctx.input.press_key(key)?;

        match pause {
            Some(pause) => thread::sleep(pause),
            None if self.ctx.config.typing.realistic => thread::sleep(self.random_pause()),
            None => {}
        }

        Ok(())
    }

    fn random_pause(&self) -> Duration {
        let typing = self.ctx.config.typing;
        let micros = if typing.max_pause_us <= typing.min_pause_us {
            typing.min_pause_us
        } else {
            rand::thread_rng().gen_range(typing.min_pause_us..=typing.max_pause_us)
        };

        Duration::from_micros(micros)
    }
}
