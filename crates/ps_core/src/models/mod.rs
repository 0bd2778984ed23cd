pub mod player;
pub mod team;

pub use player::{Abilities, Player, PlayerRole};
pub use team::{Team, TeamSide, SQUAD_SIZE};
