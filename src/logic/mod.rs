// Logic Layer - parsing user input and running commands

pub mod add_weights;
pub mod command;
pub mod index;
pub mod messages;
pub mod parser;

pub use add_weights::{AddWeightsCommand, WeightAddDescriptor};
pub use command::{Command, CommandError, CommandResult};
pub use index::Index;
pub use parser::{parse_command, AddWeightsCommandParser, ParseError};
