mod card;
pub use self::card::{Card, Suit, Value};

mod deck;
pub use self::deck::Deck;

mod error;
pub use self::error::CardParseError;

mod player_bit_set;
pub use self::player_bit_set::PlayerBitSet;

mod rank;
pub use self::rank::{HandCategory, Rank, Rankable};
