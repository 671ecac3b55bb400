use rollcall_core::Msg;

/// One line typed into the popup prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Add(String),
    Delete(String),
    Check,
    Help,
    Quit,
}

pub const HELP: &str = "commands: add <name> | del <name> | check | help | quit";

pub fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let (verb, rest) = match line.trim_start().split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim(), ""),
    };
    match verb.to_ascii_lowercase().as_str() {
        "" => None,
        "add" | "a" => Some(UserCommand::Add(rest.to_string())),
        "del" | "delete" | "rm" | "d" => Some(UserCommand::Delete(rest.trim().to_string())),
        "check" | "c" => Some(UserCommand::Check),
        "quit" | "exit" | "q" => Some(UserCommand::Quit),
        _ => Some(UserCommand::Help),
    }
}

/// Messages the command translates to. Adding goes through the input box,
/// as typing a name and pressing Enter would.
pub fn to_msgs(command: UserCommand) -> Vec<Msg> {
    match command {
        UserCommand::Add(name) => vec![Msg::InputChanged(name), Msg::AddClicked],
        UserCommand::Delete(name) => vec![Msg::DeleteClicked(name)],
        UserCommand::Check => vec![Msg::CheckClicked],
        UserCommand::Help | UserCommand::Quit => Vec::new(),
    }
}
