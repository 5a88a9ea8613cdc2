use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::FormField;

pub const HELP: &str = "\
Commands:
  from <city>            set the origin city
  to <city>              set the destination city
  date <YYYY-MM-DD>      set the travel date
  time <HH:MM>           set the travel time
  set <field> <value>    set any form field
  submit                 request a safety prediction
  show                   redraw the dashboard
  details                toggle model inputs in the result panel
  status                 check the prediction service
  help                   show this list
  quit                   leave
";

/// A line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FormField, String),
    Submit,
    Show,
    Details,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "from" | "to" | "date" | "time" => {
                let field = verb.parse::<FormField>()?;
                // Clearing the optional time is allowed, required fields need a value.
                if rest.is_empty() && field.is_required() {
                    return Err(Error::MissingArgument(verb.to_string()));
                }
                Ok(Command::Set(field, rest.to_string()))
            }
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err(Error::MissingArgument("set".to_string()));
                }
                Ok(Command::Set(name.parse()?, value.to_string()))
            }
            "submit" | "predict" => Ok(Command::Submit),
            "show" => Ok(Command::Show),
            "details" => Ok(Command::Details),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(Error::UnknownCommand(verb.to_string())),
        }
    }
}
