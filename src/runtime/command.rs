//! Console commands: one per input line.

use thiserror::Error;

use crate::catalog::Category;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Search(String),
    /// `None` clears the category filter.
    Category(Option<Category>),
    /// `None` clears the language filter.
    Lang(Option<String>),
    Clear,
    /// 1-based index into the current listing.
    Play(usize),
    PlayPause,
    Next,
    Prev,
    Seek(f64),
    Forward,
    Back,
    Volume(f32),
    VolumeUp,
    VolumeDown,
    Mute,
    Shuffle,
    Repeat,
    Status,
    Queue,
    Recent,
    Delete(usize),
    Playlists,
    PlaylistNew(String),
    PlaylistOpen(usize),
    PlaylistClose,
    PlaylistAdd(usize),
    PlaylistRemove(usize),
    PlaylistPlay,
    PlaylistDelete(usize),
    Config,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "" => return Err(ParseError::Empty),
            "list" | "ls" => Self::List,
            "search" | "/" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("search <text>"));
                }
                Self::Search(rest.to_string())
            }
            "category" => match rest.to_ascii_lowercase().as_str() {
                "all" => Self::Category(None),
                other => Self::Category(Some(
                    Category::parse(other).ok_or(ParseError::Usage("category <song|bgm|all>"))?,
                )),
            },
            "lang" => match rest {
                "" => return Err(ParseError::Usage("lang <tag|all>")),
                r if r.eq_ignore_ascii_case("all") => Self::Lang(None),
                r => Self::Lang(Some(r.to_string())),
            },
            "clear" => Self::Clear,
            "play" => Self::Play(index(rest, "play <n>")?),
            "pause" | "p" => Self::PlayPause,
            "next" | "n" => Self::Next,
            "prev" => Self::Prev,
            "seek" => Self::Seek(
                rest.parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite())
                    .ok_or(ParseError::Usage("seek <seconds>"))?,
            ),
            "fwd" => Self::Forward,
            "back" => Self::Back,
            "vol" => Self::Volume(
                rest.parse::<f32>()
                    .ok()
                    .filter(|v| (0.0..=1.0).contains(v))
                    .ok_or(ParseError::Usage("vol <0-1>"))?,
            ),
            "up" => Self::VolumeUp,
            "down" => Self::VolumeDown,
            "mute" => Self::Mute,
            "shuffle" => Self::Shuffle,
            "repeat" => Self::Repeat,
            "status" => Self::Status,
            "queue" => Self::Queue,
            "recent" => Self::Recent,
            "delete" => Self::Delete(index(rest, "delete <n>")?),
            "playlists" => Self::Playlists,
            "playlist" => parse_playlist(rest)?,
            "config" => Self::Config,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(ParseError::Unknown(word.to_string())),
        };
        Ok(cmd)
    }
}

const PLAYLIST_USAGE: &str =
    "playlist <new NAME|open N|close|add N|remove N|play|delete N>";

fn parse_playlist(args: &str) -> Result<Command, ParseError> {
    let (sub, rest) = match args.split_once(char::is_whitespace) {
        Some((s, r)) => (s, r.trim()),
        None => (args, ""),
    };

    let cmd = match sub.to_ascii_lowercase().as_str() {
        "new" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("playlist new <name>"));
            }
            Command::PlaylistNew(rest.to_string())
        }
        "open" => Command::PlaylistOpen(index(rest, "playlist open <n>")?),
        "close" => Command::PlaylistClose,
        "add" => Command::PlaylistAdd(index(rest, "playlist add <n>")?),
        "remove" => Command::PlaylistRemove(index(rest, "playlist remove <n>")?),
        "play" => Command::PlaylistPlay,
        "delete" => Command::PlaylistDelete(index(rest, "playlist delete <n>")?),
        _ => return Err(ParseError::Usage(PLAYLIST_USAGE)),
    };
    Ok(cmd)
}

fn index(arg: &str, usage: &'static str) -> Result<usize, ParseError> {
    arg.parse::<usize>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or(ParseError::Usage(usage))
}
