pub const TITLE_GLYPH: &str = "🎬";
pub const CARD_GLYPH: &str = "🎥";
/// Inner width of a result card, in terminal columns.
pub const CARD_WIDTH: usize = 26;
/// Stands in for control characters in text from the endpoint.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';
pub const CARD_GAP: &str = "  ";
pub const PROMPT: &str = "> ";
pub const QUIT_COMMAND: &str = ":quit";
