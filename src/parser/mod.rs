//! Turns one line of user input into a [`Command`].

pub mod tokenizer;

use crate::commands::{
    AddCommand, ClearCommand, Command, DeleteCommand, EditCommand, EditTaskDescriptor,
    FindCommand, Index, ListCommand, MarkCommand, RedoCommand, ScheduleCommand, SyncCommand,
    SyncToggle, UndoCommand, ADD_USAGE, DELETE_USAGE, EDIT_USAGE, FIND_USAGE, HELP_USAGE,
    MARK_USAGE, SCHEDULE_USAGE, SYNC_USAGE, UNMARK_USAGE,
};
use crate::error::{FieldError, ParseError};
use crate::task::{Deadline, Name, Note, Priority, Status, Tag};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeSet;
use tokenizer::{
    ArgumentMultimap, ArgumentTokenizer, PREFIX_DEADLINE, PREFIX_NOTE, PREFIX_PRIORITY,
    PREFIX_STATUS, PREFIX_TAG,
};

pub const COMMAND_WORDS: [&str; 14] = [
    "add", "edit", "schedule", "mark", "unmark", "delete", "find", "list", "clear", "undo",
    "redo", "sync", "help", "exit",
];

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let input = input.trim_start();
    if input.trim_end().is_empty() {
        return Err(ParseError::InvalidFormat { usage: HELP_USAGE });
    }

    let (word, args) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input.trim_end(), ""));

    match word {
        "add" => parse_add(args),
        "edit" => parse_edit(args),
        "schedule" => parse_schedule(args),
        "mark" => parse_index_only(args, MARK_USAGE)
            .map(|index| Command::Mark(MarkCommand::new(index, Status::Complete))),
        "unmark" => parse_index_only(args, UNMARK_USAGE)
            .map(|index| Command::Mark(MarkCommand::new(index, Status::Incomplete))),
        "delete" => parse_index_only(args, DELETE_USAGE)
            .map(|index| Command::Delete(DeleteCommand::new(index))),
        "find" => parse_find(args),
        "list" => Ok(Command::List(ListCommand)),
        "clear" => Ok(Command::Clear(ClearCommand)),
        "undo" => Ok(Command::Undo(UndoCommand)),
        "redo" => Ok(Command::Redo(RedoCommand)),
        "sync" => parse_sync(args),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(ParseError::UnknownCommand {
            word: word.to_string(),
            suggestion: suggest_command(word),
        }),
    }
}

/// Closest known command word to a mistyped one, if any is close at all.
pub fn suggest_command(word: &str) -> Option<&'static str> {
    let matcher = SkimMatcherV2::default();
    COMMAND_WORDS
        .iter()
        .filter_map(|candidate| matcher.fuzzy_match(candidate, word).map(|score| (score, *candidate)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate)
}

/// Strictly digits and greater than zero.
pub fn parse_index(raw: &str) -> Option<Index> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok().and_then(Index::from_one_based)
}

fn field_tokenizer() -> ArgumentTokenizer {
    ArgumentTokenizer::new(&[
        PREFIX_PRIORITY,
        PREFIX_STATUS,
        PREFIX_NOTE,
        PREFIX_DEADLINE,
        PREFIX_TAG,
    ])
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let map = field_tokenizer().tokenize(args);
    let name = map
        .preamble()
        .ok_or(ParseError::InvalidFormat { usage: ADD_USAGE })?;

    Ok(Command::Add(AddCommand::new(
        Name::new(name)?,
        map.value(PREFIX_PRIORITY)
            .map(Priority::parse_user_input)
            .transpose()?,
        map.value(PREFIX_STATUS).map(Status::new).transpose()?,
        non_empty(&map, PREFIX_NOTE).map(Note::new).transpose()?,
        non_empty(&map, PREFIX_DEADLINE).map(Deadline::new).transpose()?,
        map.all_values(PREFIX_TAG)
            .map(parse_tags)
            .transpose()?
            .unwrap_or_default(),
    )))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let map = field_tokenizer().tokenize(args);
    let preamble = map
        .preamble()
        .ok_or(ParseError::InvalidFormat { usage: EDIT_USAGE })?;
    let (raw_index, new_name) = preamble
        .split_once(char::is_whitespace)
        .unwrap_or((preamble, ""));
    let index = parse_index(raw_index).ok_or(ParseError::InvalidFormat { usage: EDIT_USAGE })?;

    let descriptor = EditTaskDescriptor {
        name: if new_name.trim().is_empty() {
            None
        } else {
            Some(Name::new(new_name)?)
        },
        priority: map
            .value(PREFIX_PRIORITY)
            .map(Priority::parse_user_input)
            .transpose()?,
        status: map.value(PREFIX_STATUS).map(Status::new).transpose()?,
        note: map.value(PREFIX_NOTE).map(clearable(Note::new)).transpose()?,
        deadline: map
            .value(PREFIX_DEADLINE)
            .map(clearable(Deadline::new))
            .transpose()?,
        tags: map.all_values(PREFIX_TAG).map(parse_tags).transpose()?,
    };

    Ok(Command::Edit(EditCommand::new(index, descriptor)))
}

fn parse_schedule(args: &str) -> Result<Command, ParseError> {
    let args = args.trim();
    let invalid = ParseError::InvalidFormat {
        usage: SCHEDULE_USAGE,
    };
    let (raw_index, raw_deadline) = args.split_once(char::is_whitespace).ok_or(invalid.clone())?;
    let index = parse_index(raw_index).ok_or(invalid)?;
    let deadline = Deadline::new(raw_deadline)?;
    Ok(Command::Schedule(ScheduleCommand::new(index, deadline)))
}

fn parse_index_only(args: &str, usage: &'static str) -> Result<Index, ParseError> {
    parse_index(args).ok_or(ParseError::InvalidFormat { usage })
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: FIND_USAGE });
    }
    Ok(Command::Find(FindCommand::new(keywords)))
}

fn parse_sync(args: &str) -> Result<Command, ParseError> {
    let toggle = match args.trim() {
        "on" => SyncToggle::On,
        "off" => SyncToggle::Off,
        _ => return Err(ParseError::InvalidFormat { usage: SYNC_USAGE }),
    };
    Ok(Command::Sync(SyncCommand::new(toggle)))
}

/// A lone empty `t/` means "no tags".
fn parse_tags(values: &[String]) -> Result<BTreeSet<Tag>, FieldError> {
    if let [only] = values {
        if only.is_empty() {
            return Ok(BTreeSet::new());
        }
    }
    values.iter().map(|value| Tag::new(value)).collect()
}

fn non_empty(map: &ArgumentMultimap, prefix: tokenizer::Prefix) -> Option<&str> {
    map.value(prefix).filter(|value| !value.is_empty())
}

fn clearable<T>(
    parse: fn(&str) -> Result<T, FieldError>,
) -> impl Fn(&str) -> Result<Option<T>, FieldError> {
    move |raw| {
        if raw.is_empty() {
            Ok(None)
        } else {
            parse(raw).map(Some)
        }
    }
}
