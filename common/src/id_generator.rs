use rand::Rng;

use crate::identifiers::GameId;

const GAME_ID_LENGTH: usize = 32;
const HEX_DIGITS: &[u8] = b"0123456789abcdef";

pub fn generate_game_id() -> GameId {
    let mut rng = rand::rng();
    let id: String = (0..GAME_ID_LENGTH)
        .map(|_| HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())] as char)
        .collect();
    GameId::new(id)
}
