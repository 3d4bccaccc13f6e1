use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::rule_set::B3S23;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

pub const WELCOME: &str = "\
Welcome to the game of Life, a simulation of the lifecycle of a bacteria colony.
Cells live and die by the following rules:

\tA cell with 1 or fewer neighbors dies of loneliness
\tLocations with 2 neighbors remain stable
\tLocations with 3 neighbors will spontaneously create life
\tLocations with 4 or more neighbors die of overcrowding

In the animation, new cells are dark and fade to gray as they age.
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Command \"{got}\" is not supported")]
    UnknownCommand { got: String },

    #[error("Speed \"{got}\" is not supported, pick either 1, 2, or 3")]
    UnknownSpeed { got: String },

    #[error("Unknown argument \"{got}\"")]
    UnknownArgument { got: String },

    #[error("--rule expects a rule like b3/s23")]
    MissingRule,

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),
}

/// Command line options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Print grids as text instead of drawing them
    pub text: bool,

    pub rule: RuleSet,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            text: false,
            rule: B3S23,
        }
    }
}

impl Options {
    /// Parse the arguments following the program name, e.g. `--text --rule b36/s23`.
    pub fn parse<I, S>(args: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--text" => options.text = true,
                "--rule" => {
                    let rule = args.next().ok_or(InputError::MissingRule)?;
                    options.rule = rule.as_ref().parse()?;
                }
                got => {
                    return Err(InputError::UnknownArgument {
                        got: got.to_string(),
                    });
                }
            }
        }

        Ok(options)
    }
}

/// Where the grid of a new run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Random,
    File(PathBuf),
}

impl Source {
    /// A blank answer asks for a random grid, anything else is a path.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Source::Random,
            path => Source::File(PathBuf::from(path)),
        }
    }
}

/// How generations are advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One generation per line entered
    Manual,

    /// One generation per timer tick
    Timed,
}

impl Mode {
    pub fn parse(line: &str) -> Self {
        if line.trim() == "manual" {
            Mode::Manual
        } else {
            Mode::Timed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

impl Speed {
    /// Time between two generations
    pub fn interval(&self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(1000),
            Speed::Medium => Duration::from_millis(500),
            Speed::Fast => Duration::from_millis(100),
        }
    }
}

impl FromStr for Speed {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Speed::Slow),
            "2" => Ok(Speed::Medium),
            "3" => Ok(Speed::Fast),
            got => Err(InputError::UnknownSpeed {
                got: got.to_string(),
            }),
        }
    }
}

/// Answer to a "press enter or type quit" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A blank line
    Continue,

    Quit,
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Command::Continue),
            "quit" => Ok(Command::Quit),
            got => Err(InputError::UnknownCommand {
                got: got.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::Command;
    use super::InputError;
    use super::Mode;
    use super::Options;
    use super::Source;
    use super::Speed;
    use crate::rule_set::B3S23;
    use crate::rule_set::RuleError;

    #[test]
    fn source() {
        assert_eq!(Source::parse(""), Source::Random);
        assert_eq!(Source::parse("  \n"), Source::Random);
        assert_eq!(
            Source::parse("grids/glider.txt\n"),
            Source::File(PathBuf::from("grids/glider.txt"))
        );
    }

    #[test]
    fn mode() {
        assert_eq!(Mode::parse("manual\n"), Mode::Manual);
        assert_eq!(Mode::parse(""), Mode::Timed);
        assert_eq!(Mode::parse("auto"), Mode::Timed);
    }

    #[test]
    fn speeds() {
        let ms = |s: &str| s.parse::<Speed>().map(|s| s.interval());

        assert_eq!(ms("1"), Ok(Duration::from_millis(1000)));
        assert_eq!(ms("2\n"), Ok(Duration::from_millis(500)));
        assert_eq!(ms("3"), Ok(Duration::from_millis(100)));
        assert_eq!(
            ms("4"),
            Err(InputError::UnknownSpeed {
                got: "4".to_string()
            })
        );
    }

    #[test]
    fn commands() {
        assert_eq!("".parse::<Command>(), Ok(Command::Continue));
        assert_eq!("quit\n".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "stop".parse::<Command>(),
            Err(InputError::UnknownCommand {
                got: "stop".to_string()
            })
        );
    }

    #[test]
    fn options() {
        let none: [&str; 0] = [];
        assert_eq!(Options::parse(none), Ok(Options::default()));

        let options = Options::parse(["--rule", "b36/s23", "--text"]).unwrap();
        assert!(options.text);
        assert_eq!(options.rule.to_string(), "B36/S23");
        assert_ne!(options.rule, B3S23);
    }

    #[test]
    fn bad_options() {
        assert_eq!(Options::parse(["--rule"]), Err(InputError::MissingRule));
        assert_eq!(
            Options::parse(["--rule", "b9/s23"]),
            Err(InputError::Rule(RuleError::InvalidCount { got: '9' }))
        );
        assert_eq!(
            Options::parse(["--fast"]),
            Err(InputError::UnknownArgument {
                got: "--fast".to_string()
            })
        );
    }
}
