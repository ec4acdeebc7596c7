use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CommandName {
    Stats,
    Charts,
    DoublingTime,
    Vaccinations,
    StartUpdates,
    StopUpdates,
    NotifyNewCases,
}

/// Parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stats,
    Charts,
    /// Optional region argument, as typed.
    DoublingTime(Option<String>),
    Vaccinations,
    StartUpdates,
    StopUpdates,
    NotifyNewCases,
    /// Slash command this bot does not serve.
    Unknown(String),
}

impl Command {
    /// Parses `/name@bot arg arg`. Text without a leading slash is not a command.
    pub fn parse(text: &str) -> Option<Command> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;
        let name: String = head
            .chars()
            .take_while(|ch| ch.is_alphanumeric() || *ch == '_')
            .collect::<String>()
            .to_lowercase();
        let args: Vec<&str> = tokens.collect();

        let command = match name.parse::<CommandName>() {
            Ok(CommandName::Stats) => Command::Stats,
            Ok(CommandName::Charts) => Command::Charts,
            Ok(CommandName::DoublingTime) => {
                let region = args.join(" ");
                Command::DoublingTime(if region.is_empty() { None } else { Some(region) })
            }
            Ok(CommandName::Vaccinations) => Command::Vaccinations,
            Ok(CommandName::StartUpdates) => Command::StartUpdates,
            Ok(CommandName::StopUpdates) => Command::StopUpdates,
            Ok(CommandName::NotifyNewCases) => Command::NotifyNewCases,
            Err(_) => Command::Unknown(name),
        };
        Some(command)
    }

    /// Commands that may run without a chat, i.e. from the scheduler.
    pub fn is_chatless(&self) -> bool {
        matches!(self, Command::NotifyNewCases)
    }
}
