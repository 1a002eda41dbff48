//! REPL command parsing.

use pupfinder_core::search::SortOrder;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/login", "/logout", "/search", "/breeds", "/breed", "/age", "/zip", "/sort", "/reset",
    "/next", "/prev", "/find", "/fav", "/favs", "/match", "/dismiss", "/help",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { name: String, email: String },
    Logout,
    Search,
    Breeds,
    /// Toggle one breed; `None` clears the breed filter
    Breed(Option<String>),
    Age { min: Option<u32>, max: Option<u32> },
    Zip(Vec<String>),
    Sort(SortOrder),
    Reset,
    Next,
    Prev,
    Find(String),
    Fav(String),
    Favs,
    Match,
    Dismiss,
    Help,
    Quit,
}

impl Command {
    /// Commands allowed without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Command::Login { .. } | Command::Help | Command::Quit)
    }
}

/// Parses one input line. `Err` carries a usage message.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return Ok(Command::Quit);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match head {
        "/login" => {
            // the email is the last word; the name may contain spaces
            let (email, name) = args
                .split_last()
                .filter(|(_, name)| !name.is_empty())
                .ok_or("usage: /login <name> <email>")?;
            Ok(Command::Login {
                name: name.join(" "),
                email: email.to_string(),
            })
        }
        "/logout" => Ok(Command::Logout),
        "/search" => Ok(Command::Search),
        "/breeds" => Ok(Command::Breeds),
        "/breed" => Ok(Command::Breed((!rest.is_empty()).then(|| rest.to_string()))),
        "/age" => {
            let bound = |arg: Option<&&str>| -> Result<Option<u32>, String> {
                match arg {
                    None | Some(&"-") => Ok(None),
                    Some(value) => value
                        .parse()
                        .map(Some)
                        .map_err(|_| format!("not an age: {}", value)),
                }
            };
            if args.len() > 2 {
                return Err("usage: /age <min|-> <max|->".to_string());
            }
            Ok(Command::Age {
                min: bound(args.first())?,
                max: bound(args.get(1))?,
            })
        }
        "/zip" => Ok(Command::Zip(args.iter().map(|s| s.to_string()).collect())),
        "/sort" => {
            let token = args.first().ok_or("usage: /sort <name|breed|age>[:asc|desc]")?;
            token
                .parse()
                .map(Command::Sort)
                .map_err(|e: pupfinder_core::PupError| e.user_message())
        }
        "/reset" => Ok(Command::Reset),
        "/next" => Ok(Command::Next),
        "/prev" => Ok(Command::Prev),
        "/find" => Ok(Command::Find(rest.to_string())),
        "/fav" => {
            let id = args.first().ok_or("usage: /fav <dog id>")?;
            Ok(Command::Fav(id.to_string()))
        }
        "/favs" => Ok(Command::Favs),
        "/match" => Ok(Command::Match),
        "/dismiss" => Ok(Command::Dismiss),
        "/help" => Ok(Command::Help),
        other => Err(format!("Unknown command: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pupfinder_core::search::{SortDirection, SortField};

    #[test]
    fn test_login_name_may_have_spaces() {
        assert_eq!(
            parse("/login Mary Jane mj@example.com").unwrap(),
            Command::Login {
                name: "Mary Jane".to_string(),
                email: "mj@example.com".to_string()
            }
        );
        assert!(parse("/login only@example.com").is_err());
        assert!(parse("/login").is_err());
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(
            parse("/age 2 5").unwrap(),
            Command::Age {
                min: Some(2),
                max: Some(5)
            }
        );
        assert_eq!(
            parse("/age - 5").unwrap(),
            Command::Age {
                min: None,
                max: Some(5)
            }
        );
        assert_eq!(parse("/age").unwrap(), Command::Age { min: None, max: None });
        assert!(parse("/age two").is_err());
    }

    #[test]
    fn test_breed_and_sort() {
        assert_eq!(
            parse("/breed German Shepherd").unwrap(),
            Command::Breed(Some("German Shepherd".to_string()))
        );
        assert_eq!(parse("/breed").unwrap(), Command::Breed(None));
        assert_eq!(
            parse("/sort age:desc").unwrap(),
            Command::Sort(SortOrder::new(SortField::Age, SortDirection::Desc))
        );
        assert!(parse("/sort").is_err());
    }

    #[test]
    fn test_public_commands() {
        assert!(parse("quit").unwrap().is_public());
        assert!(parse("/help").unwrap().is_public());
        assert!(!parse("/search").unwrap().is_public());
        assert!(parse("/bogus").is_err());
    }
}
