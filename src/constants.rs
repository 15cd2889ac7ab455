// Central constants for queue limits, message sizing and external endpoints.
pub const MAX_QUEUE_LEN: usize = 100;
pub const MAX_SUGGESTIONS_PER_USER: usize = 10;
/// Discord rejects message content longer than this many characters.
pub const MESSAGE_CHAR_LIMIT: usize = 2000;
pub const VETOED_MARKER: &str = "[VETOED]";

pub const WHEEL_BASE_URL: &str = "https://wheeldecide.com/index.php?";
// Title and spin duration appended after the choices.
pub const WHEEL_SUFFIX: &str = "t=GameHop!%21&time=10";
pub const SHORTENER_ENDPOINT: &str = "https://tinyurl.com/api-create.php";
pub const SHORTENER_TIMEOUT_SECS: u64 = 10;

pub const QUEUE_FILE: &str = "gameQueue.json";
pub const HISTORY_FILE: &str = "gameHistoryQueue.json";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const ACTIVITY_NAME: &str = "GameHop";
pub const GENERIC_FAILURE_REPLY: &str = "There was an error executing that command.";
