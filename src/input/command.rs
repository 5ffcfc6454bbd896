//! Tokenizing submitted lines and resolving command names.

/// One submitted line, split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// First token, lowercased. Empty for blank input.
    pub name: String,
    /// Remaining tokens in order.
    pub args: Vec<String>,
    /// Remaining tokens rejoined with single spaces.
    pub argument: String,
}

impl CommandInvocation {
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();
        let argument = args.join(" ");
        Self {
            name,
            args,
            argument,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }

    /// First argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }
}

/// Built-in commands, one variant per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Help,
    About,
    Experience,
    Projects,
    Skills,
    Education,
    Awards,
    Contact,
    Clear,
    Whoami,
    Pwd,
    Ls,
    Cat,
    Head,
    Tail,
    Wc,
    Grep,
    Find,
    Date,
    Uname,
    History,
    Echo,
    Tree,
    Ask,
    Portfolio,
    Exit,
}

/// Dispatch table: every accepted name, aliases included.
const COMMAND_TABLE: &[(&str, Builtin)] = &[
    ("help", Builtin::Help),
    ("about", Builtin::About),
    ("summary", Builtin::About),
    ("experience", Builtin::Experience),
    ("work", Builtin::Experience),
    ("projects", Builtin::Projects),
    ("skills", Builtin::Skills),
    ("education", Builtin::Education),
    ("awards", Builtin::Awards),
    ("contact", Builtin::Contact),
    ("clear", Builtin::Clear),
    ("whoami", Builtin::Whoami),
    ("pwd", Builtin::Pwd),
    ("ls", Builtin::Ls),
    ("cat", Builtin::Cat),
    ("head", Builtin::Head),
    ("tail", Builtin::Tail),
    ("wc", Builtin::Wc),
    ("grep", Builtin::Grep),
    ("find", Builtin::Find),
    ("date", Builtin::Date),
    ("uname", Builtin::Uname),
    ("history", Builtin::History),
    ("echo", Builtin::Echo),
    ("tree", Builtin::Tree),
    ("/ask", Builtin::Ask),
    ("/portfolio", Builtin::Portfolio),
    ("exit", Builtin::Exit),
];

impl Builtin {
    /// Resolve an already-lowercased command name.
    pub fn lookup(name: &str) -> Option<Self> {
        COMMAND_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, builtin)| *builtin)
    }

    /// Every name the table accepts.
    pub fn all_names() -> impl Iterator<Item = &'static str> {
        COMMAND_TABLE.iter().map(|(name, _)| *name)
    }
}
