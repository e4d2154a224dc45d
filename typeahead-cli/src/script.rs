//! Line commands that drive the typeahead.

use std::str::FromStr;
use std::sync::Arc;

use typeahead::{EventResult, InputEvent, Key, KeyCombo, Parameters, Typeahead};

use crate::catalog::Entry;
use crate::error::CliError;
use crate::printer;

pub const HELP: &str = "\
commands:
  type [TEXT]     replace the input text (no text clears it)
  key NAME        press a key (enter, tab, esc, up, down)
  up | down | enter | tab | esc
  focus | blur    move focus into / out of the input
  click ROW       click a dropdown row (0-based)
  select VALUE    activate the item with this value
  bind [VALUE]    set the bound value from the host side
  show            print the widget
  help            print this text
  quit            exit";

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Key(Key),
    Focus,
    Blur,
    Click(usize),
    Select(String),
    Bind(Option<String>),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line.trim_end(), ""),
        };

        let command = match name {
            "type" => Command::Type(rest.to_string()),
            "key" => Command::Key(Key::parse(rest).ok_or_else(|| CliError::InvalidArgument {
                command: "key",
                message: format!("unknown key '{rest}'"),
            })?),
            "up" | "down" | "enter" | "tab" | "esc" => match Key::parse(name) {
                Some(key) => Command::Key(key),
                None => return Err(CliError::UnknownCommand(name.to_string())),
            },
            "focus" => Command::Focus,
            "blur" => Command::Blur,
            "click" => Command::Click(rest.parse().map_err(|_| CliError::InvalidArgument {
                command: "click",
                message: format!("'{rest}' is not a row number"),
            })?),
            "select" if !rest.is_empty() => Command::Select(rest.to_string()),
            "select" => {
                return Err(CliError::InvalidArgument {
                    command: "select",
                    message: "missing value".into(),
                });
            }
            "bind" => Command::Bind((!rest.is_empty()).then(|| rest.to_string())),
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// Whether the script keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A typeahead plus the data source the host binds to it.
pub struct Session {
    typeahead: Typeahead<Entry, String>,
    data: Arc<Vec<Entry>>,
}

impl Session {
    pub fn new(typeahead: Typeahead<Entry, String>, data: Arc<Vec<Entry>>) -> Self {
        typeahead.apply_parameters(Parameters::new().data(Arc::clone(&data)));
        Self { typeahead, data }
    }

    pub fn typeahead(&self) -> &Typeahead<Entry, String> {
        &self.typeahead
    }

    /// Run one script line. Blank lines and `#` comments do nothing.
    pub async fn run_line(&self, line: &str) -> Result<Flow, CliError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let command: Command = line.parse()?;
        log::debug!("Running command {:?}", command);
        self.run(command).await
    }

    pub async fn run(&self, command: Command) -> Result<Flow, CliError> {
        let result = match command {
            Command::Type(text) => {
                self.typeahead
                    .handle_event(InputEvent::TextChanged(text))
                    .await?
            }
            Command::Key(key) => {
                self.typeahead
                    .handle_event(InputEvent::Key(KeyCombo::key(key)))
                    .await?
            }
            Command::Focus => self.typeahead.handle_event(InputEvent::FocusIn).await?,
            Command::Blur => self.typeahead.handle_event(InputEvent::FocusOut).await?,
            Command::Click(row) => self.typeahead.activate_row(row).await?,
            Command::Select(value) => {
                self.typeahead
                    .handle_event(InputEvent::ItemActivated(value))
                    .await?
            }
            Command::Bind(value) => {
                self.typeahead.apply_parameters(
                    Parameters::new()
                        .data(Arc::clone(&self.data))
                        .value(value),
                );
                self.typeahead.after_render().await?;
                EventResult::Consumed
            }
            Command::Show => {
                println!("{}", printer::render(&self.typeahead.view()));
                return Ok(Flow::Continue);
            }
            Command::Help => {
                println!("{HELP}");
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        if !result.is_handled() {
            println!("(ignored)");
        }
        println!("{}", printer::render(&self.typeahead.view()));
        Ok(Flow::Continue)
    }
}
