//! Command definitions
//!
//! Tokenizer and parsed command variants for the text command grammar.

/// Split a command line into its verb and arguments
///
/// The line is split on single ASCII spaces: the first token, uppercased,
/// is the verb; the rest are the arguments in order. No quoting or
/// escaping — a literal space inside an argument always splits it.
pub fn tokenize(text: &str) -> (String, Vec<String>) {
    let mut tokens = text.split(' ');
    let verb = tokens.next().unwrap_or("").to_uppercase();
    let args = tokens.map(str::to_string).collect();
    (verb, args)
}

/// A parsed command
///
/// HELP is meaningful only on the client, where it prints a local summary
/// and never reaches the wire; a server receiving it answers as it would
/// any unknown verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a file from the server's static root
    Get { filename: Option<String> },

    /// Echo the arguments back from the server
    Bounce { args: Vec<String> },

    /// Close the session, echoing an exit code in the goodbye
    Exit { code: Option<String> },

    /// Show the client-side command summary
    Help,

    /// Anything else; carries the normalized verb for the error reply
    Unknown { verb: String },
}

impl Command {
    /// Parse a trimmed command line
    pub fn parse(text: &str) -> Self {
        let (verb, mut args) = tokenize(text);
        match verb.as_str() {
            "GET" => Command::Get {
                filename: if args.is_empty() { None } else { Some(args.remove(0)) },
            },
            "BOUNCE" => Command::Bounce { args },
            // EXIT carries the raw first argument; extra arguments are ignored
            "EXIT" => Command::Exit {
                code: if args.is_empty() { None } else { Some(args.remove(0)) },
            },
            "HELP" => Command::Help,
            _ => Command::Unknown { verb },
        }
    }

    /// The normalized verb of this command
    pub fn verb(&self) -> &str {
        match self {
            Command::Get { .. } => "GET",
            Command::Bounce { .. } => "BOUNCE",
            Command::Exit { .. } => "EXIT",
            Command::Help => "HELP",
            Command::Unknown { verb } => verb,
        }
    }
}
