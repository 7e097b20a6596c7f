pub const USER_PREFIX: &str = "you> ";
pub const BOT_PREFIX: &str = "bot> ";
pub const PROMPT: &str = "> ";
pub const DIAGNOSTIC_PREFIX: &str = "! ";
pub const STATUS_PREFIX: &str = "  ";
pub const CARD_BULLET: &str = "* ";
pub const CARD_INDENT: &str = "    ";
