//! Interactive shell over a blocking [`Session`](crate::blocking::Session).
//!
//! The loop reads one command per line, runs it against the server and
//! prints the outcome. Server errors ([`DavError`]) and local filesystem
//! errors are reported and the loop continues; they never tear down the
//! session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::blocking::Session;
use crate::error::DavError;
use crate::models::ResourceKind;
use crate::path::basename;

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls(Option<String>),
    Cd(String),
    Mkdir(String),
    Upload { src: PathBuf, dest: String },
    Download { src: String, dest: Option<PathBuf> },
    Move { src: String, dest: String },
    Copy { src: String, dest: String },
    Rm(String),
    Help(Option<String>),
    Exit,
}

/// Parses one input line. Returns `Ok(None)` for blank lines and a usage
/// message for unknown commands or wrong arity. Arguments are separated by
/// whitespace; paths containing spaces are not supported by the shell
/// grammar.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let arity = |expected: usize, usage: &str| -> Result<(), String> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(format!("usage: {usage}"))
        }
    };

    let command = match name {
        "ls" => match args.as_slice() {
            [] => Command::Ls(None),
            [path] => Command::Ls(Some((*path).to_string())),
            _ => return Err("usage: ls [path]".to_string()),
        },
        "cd" => {
            arity(1, "cd <dest>")?;
            Command::Cd(args[0].to_string())
        }
        "mkdir" => {
            arity(1, "mkdir <name>")?;
            Command::Mkdir(args[0].to_string())
        }
        "upload" => {
            arity(2, "upload <src> <dest>")?;
            Command::Upload {
                src: PathBuf::from(args[0]),
                dest: args[1].to_string(),
            }
        }
        "download" => match args.as_slice() {
            [src] => Command::Download {
                src: (*src).to_string(),
                dest: None,
            },
            [src, dest] => Command::Download {
                src: (*src).to_string(),
                dest: Some(PathBuf::from(dest)),
            },
            _ => return Err("usage: download <src> [dest]".to_string()),
        },
        "move" | "mv" => {
            arity(2, "move <src> <dest>")?;
            Command::Move {
                src: args[0].to_string(),
                dest: args[1].to_string(),
            }
        }
        "copy" | "cp" => {
            arity(2, "copy <src> <dest>")?;
            Command::Copy {
                src: args[0].to_string(),
                dest: args[1].to_string(),
            }
        }
        "rm" => {
            arity(1, "rm <path>")?;
            Command::Rm(args[0].to_string())
        }
        "help" => match args.as_slice() {
            [] => Command::Help(None),
            [topic] => Command::Help(Some((*topic).to_string())),
            _ => return Err("usage: help [cmd]".to_string()),
        },
        "exit" | "quit" => Command::Exit,
        other => return Err(format!("unknown command {other:?}, try `help`")),
    };
    Ok(Some(command))
}

/// Fills in the remote file name when the destination names a directory:
/// `.` and `/`-terminated or extensionless destinations get the source's
/// base name appended.
pub(crate) fn default_remote_target(dest: &str, src_name: &str) -> String {
    if dest == "." {
        return src_name.to_string();
    }
    if dest.ends_with('/') {
        return format!("{dest}{src_name}");
    }
    if !basename(dest).contains('.') {
        return format!("{dest}/{src_name}");
    }
    dest.to_string()
}

/// Picks the local file to write a download into. A missing destination or
/// one that is (or looks like) a directory gets the source's base name.
pub(crate) fn default_local_target(dest: Option<PathBuf>, src: &str) -> PathBuf {
    let name = basename(src);
    match dest {
        None => PathBuf::from(name),
        Some(path) => {
            if path.is_dir() || path.extension().is_none() {
                path.join(name)
            } else {
                path
            }
        }
    }
}

/// Runs the interactive loop until `exit` or end of input.
pub fn run(mut session: Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    println!("Connected. Type `help` for the command list, `exit` to leave.");
    loop {
        write!(stdout, "{} > ", session.cwd())?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(Some(Command::Exit)) => break,
            Ok(Some(command)) => {
                debug!(?command, "running shell command");
                if let Err(e) = execute(&mut session, command) {
                    eprintln!("error: {e}");
                }
            }
            Ok(None) => {}
            Err(usage) => eprintln!("{usage}"),
        }
    }
    Ok(())
}

enum ShellError {
    Dav(DavError),
    Local(io::Error),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Dav(e) => write!(f, "{e}"),
            ShellError::Local(e) => write!(f, "local file error: {e}"),
        }
    }
}

impl From<DavError> for ShellError {
    fn from(e: DavError) -> Self {
        ShellError::Dav(e)
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Local(e)
    }
}

fn execute(session: &mut Session, command: Command) -> Result<(), ShellError> {
    match command {
        Command::Ls(path) => {
            let resources = session.ls(path.as_deref().unwrap_or("."))?;
            for resource in resources {
                match &resource.kind {
                    ResourceKind::Collection => {
                        println!("d {:>12} {:>31} {}/", "-", resource.last_modified, resource.basename());
                    }
                    ResourceKind::File { size, .. } => {
                        println!("- {:>12} {:>31} {}", size, resource.last_modified, resource.basename());
                    }
                }
            }
        }
        Command::Cd(dest) => session.cd(&dest),
        Command::Mkdir(name) => session.mkdir(&name)?,
        Command::Upload { src, dest } => {
            // local filesystem problems are reported here, they never reach
            // the session
            let content = fs::read(&src)?;
            let src_name = src
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let dest = default_remote_target(&dest, &src_name);
            session.upload(&dest, &content)?;
            println!("uploaded {} -> {}", src.display(), dest);
        }
        Command::Download { src, dest } => {
            let content = session.download(&src)?;
            let target = default_local_target(dest, &src);
            fs::write(&target, content)?;
            println!("downloaded {} -> {}", src, target.display());
        }
        Command::Move { src, dest } => session.mv(&src, &dest)?,
        Command::Copy { src, dest } => session.cp(&src, &dest)?,
        Command::Rm(path) => session.rm(&path)?,
        Command::Help(topic) => print_help(topic.as_deref()),
        Command::Exit => {}
    }
    Ok(())
}

fn print_help(topic: Option<&str>) {
    let entries: &[(&str, &str)] = &[
        ("ls", "ls [path] - list the entries of a directory"),
        ("cd", "cd <dest> - change the working directory (not validated against the server)"),
        ("mkdir", "mkdir <name> - create a directory"),
        ("upload", "upload <src> <dest> - upload a local file"),
        ("download", "download <src> [dest] - download a file"),
        ("move", "move <src> <dest> - move a file into <dest>"),
        ("copy", "copy <src> <dest> - copy a file into <dest>"),
        ("rm", "rm <path> - delete a file or directory"),
        ("help", "help [cmd] - show this help"),
        ("exit", "exit - leave the shell"),
    ];
    match topic {
        Some(name) => match entries.iter().find(|(cmd, _)| *cmd == name) {
            Some((_, text)) => println!("{text}"),
            None => println!("no such command: {name}"),
        },
        None => {
            for (_, text) in entries {
                println!("{text}");
            }
        }
    }
}
