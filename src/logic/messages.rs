// User-facing messages shared by the parser and the commands.

pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MESSAGE_INVALID_PERSON_DISPLAYED_INDEX: &str = "The person index provided is invalid";
pub const MESSAGE_PERSONS_LISTED_OVERVIEW: &str = "persons listed!";

pub const MESSAGE_INVALID_INDEX: &str = "Index is not a non-zero unsigned integer.";

pub const MESSAGE_UNDO_SUCCESS: &str = "Undo success!";
pub const MESSAGE_UNDO_FAILURE: &str = "No more commands to undo!";
pub const MESSAGE_REDO_SUCCESS: &str = "Redo success!";
pub const MESSAGE_REDO_FAILURE: &str = "No more commands to redo!";

pub const HELP_MESSAGE: &str = "Commands:\n\
    w/ WEIGHT INDEX1 [INDEX2...]   append a weight reading to the listed persons (alias: weight/)\n\
    list                           show all persons\n\
    find KEYWORD [KEYWORD...]      show persons whose name contains any keyword\n\
    undo | redo                    step through committed changes\n\
    help                           show this message\n\
    exit                           quit";
