// 🔤 Command Parser - user input → Command
//
// Tokens are split on whitespace. Values are validated here (through the
// entity factories) so a command is only ever built from well-formed input.

use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

use super::add_weights::{
    AddWeightsCommand, WeightAddDescriptor, COMMAND_ALIAS, COMMAND_WORD, MESSAGE_NOT_EDITED,
    MESSAGE_USAGE,
};
use super::command::{Command, FIND_USAGE};
use super::index::Index;
use super::messages::{HELP_MESSAGE, MESSAGE_INVALID_INDEX, MESSAGE_UNKNOWN_COMMAND};
use crate::entities::{ConstraintError, Weight};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input does not match the command's shape; carries its usage text
    #[error("Invalid command format! \n{usage}")]
    InvalidFormat { usage: &'static str },

    #[error("{}", MESSAGE_NOT_EDITED)]
    NotEdited,

    /// A value failed its format constraints
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error("{}", MESSAGE_UNKNOWN_COMMAND)]
    UnknownCommand { word: String },
}

impl ParseError {
    fn invalid_format(usage: &'static str) -> Self {
        ParseError::InvalidFormat { usage }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Parse one line of user input.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (word, args) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    debug!(word, args, "Parsing command");

    match word {
        "" => Err(ParseError::invalid_format(HELP_MESSAGE)),
        COMMAND_WORD | COMMAND_ALIAS => AddWeightsCommandParser.parse(args).map(Command::AddWeights),
        "list" => Ok(Command::List),
        "find" => {
            let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
            if keywords.is_empty() {
                return Err(ParseError::invalid_format(FIND_USAGE));
            }
            Ok(Command::Find(keywords))
        }
        "undo" => Ok(Command::Undo),
        "redo" => Ok(Command::Redo),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand {
            word: other.to_string(),
        }),
    }
}

// ============================================================================
// ADD WEIGHTS
// ============================================================================

pub struct AddWeightsCommandParser;

impl AddWeightsCommandParser {
    /// `WEIGHT INDEX1 [INDEX2...]`
    ///
    /// The first token is always the weight; every later token must be a
    /// position, and a single bad one rejects the whole input.
    pub fn parse(&self, args: &str) -> Result<AddWeightsCommand, ParseError> {
        let mut tokens = args.split_whitespace();
        let new_weight = tokens.next().unwrap_or("");

        let indices = tokens
            .map(parse_index)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseError::invalid_format(MESSAGE_USAGE))?;

        let weights = parse_weights_for_edit(&[new_weight])?.unwrap_or_default();
        let descriptor = WeightAddDescriptor::new(weights);

        if !descriptor.is_any_field_edited() {
            return Err(ParseError::NotEdited);
        }
        if indices.is_empty() {
            return Err(ParseError::invalid_format(MESSAGE_USAGE));
        }

        Ok(AddWeightsCommand::new(indices, descriptor))
    }
}

// ============================================================================
// PARSER UTILITIES
// ============================================================================

/// A 1-based position: a non-zero unsigned integer, surrounding spaces allowed.
pub fn parse_index(one_based: &str) -> Result<Index, ConstraintError> {
    one_based
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or_else(|| ConstraintError::new("index", MESSAGE_INVALID_INDEX))
}

pub fn parse_weights<'a, I>(raws: I) -> Result<BTreeSet<Weight>, ConstraintError>
where
    I: IntoIterator<Item = &'a str>,
{
    raws.into_iter().map(Weight::parse).collect()
}

/// `None` when nothing was supplied, an empty set when the only value is the
/// empty string, otherwise every value parsed.
pub fn parse_weights_for_edit(raws: &[&str]) -> Result<Option<BTreeSet<Weight>>, ConstraintError> {
    match raws {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        _ => parse_weights(raws.iter().copied()).map(Some),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::weight::MESSAGE_WEIGHT_CONSTRAINTS;

    fn index(one_based: usize) -> Index {
        Index::from_one_based(one_based).unwrap()
    }

    fn expected(weight: &str, positions: &[usize]) -> AddWeightsCommand {
        AddWeightsCommand::new(
            positions.iter().map(|p| index(*p)).collect(),
            WeightAddDescriptor::new([Weight::parse(weight).unwrap()].into_iter().collect()),
        )
    }

    #[test]
    fn test_parse_weight_and_positions() {
        let command = AddWeightsCommandParser.parse(" 72.5 1 3 ").unwrap();
        assert_eq!(command, expected("72.5", &[1, 3]));
    }

    #[test]
    fn test_extra_whitespace_between_tokens() {
        let command = AddWeightsCommandParser.parse("72.5   2\t4").unwrap();
        assert_eq!(command, expected("72.5", &[2, 4]));
    }

    #[test]
    fn test_empty_input_not_edited() {
        assert_eq!(AddWeightsCommandParser.parse(""), Err(ParseError::NotEdited));
        assert_eq!(AddWeightsCommandParser.parse("   "), Err(ParseError::NotEdited));
        assert_eq!(ParseError::NotEdited.to_string(), MESSAGE_NOT_EDITED);
    }

    #[test]
    fn test_bad_position_is_format_error() {
        let err = AddWeightsCommandParser.parse("72.5 abc").unwrap_err();
        assert_eq!(err, ParseError::InvalidFormat { usage: MESSAGE_USAGE });
        assert!(err.to_string().starts_with("Invalid command format!"));

        for input in ["72.5 0", "72.5 -1", "72.5 1 x", "72.5 1.5"] {
            assert_eq!(
                AddWeightsCommandParser.parse(input),
                Err(ParseError::InvalidFormat { usage: MESSAGE_USAGE }),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_invalid_weight_is_constraint_error() {
        let err = AddWeightsCommandParser.parse("heavy 1").unwrap_err();
        assert_eq!(err.to_string(), MESSAGE_WEIGHT_CONSTRAINTS);
    }

    #[test]
    fn test_missing_positions_is_format_error() {
        assert_eq!(
            AddWeightsCommandParser.parse("72.5"),
            Err(ParseError::InvalidFormat { usage: MESSAGE_USAGE })
        );
    }

    #[test]
    fn test_parse_weights_for_edit() {
        assert_eq!(parse_weights_for_edit(&[]), Ok(None));
        assert_eq!(parse_weights_for_edit(&[""]), Ok(Some(BTreeSet::new())));
        assert_eq!(parse_weights_for_edit(&["70", "70"]).unwrap().unwrap().len(), 1);
        assert!(parse_weights_for_edit(&["70", ""]).is_err());
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index(" 2 "), Ok(index(2)));
        assert_eq!(parse_index("0").unwrap_err().message, MESSAGE_INVALID_INDEX);
        assert!(parse_index("one").is_err());
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(
            parse_command("w/ 72.5 1"),
            Ok(Command::AddWeights(expected("72.5", &[1])))
        );
        assert_eq!(
            parse_command("weight/ 72.5 1"),
            Ok(Command::AddWeights(expected("72.5", &[1])))
        );
        assert_eq!(parse_command("w/"), Err(ParseError::NotEdited));
        assert_eq!(parse_command("  list "), Ok(Command::List));
        assert_eq!(
            parse_command("find alice  bob"),
            Ok(Command::Find(vec!["alice".to_string(), "bob".to_string()]))
        );
        assert_eq!(
            parse_command("find"),
            Err(ParseError::InvalidFormat { usage: FIND_USAGE })
        );
        assert_eq!(
            parse_command("jump"),
            Err(ParseError::UnknownCommand { word: "jump".to_string() })
        );
        assert!(matches!(parse_command(""), Err(ParseError::InvalidFormat { .. })));
    }
}
