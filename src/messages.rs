//! Player-facing protocol strings.

pub const START_GAME: &str = "Memory game: In order to start, send <S>  ";
pub const SELECT_DIFFICULTY: &str = "Select difficulty from 1 to 3, send <num>  ";
pub const WIN_GAME: &str = "You won! +1 point. Total score: ";
pub const LOSE_GAME: &str = "You lost. Total score: ";
pub const SPACES: &str = "         ";
