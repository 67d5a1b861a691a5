//! Game variant descriptors.
//!
//! Supported games do not share a player-identifier scheme: Mordhau keys
//! players by platform (PlayFab) account id, Minecraft by name. Each variant
//! declares once, through its [`GameDescriptor`], which attribute of a
//! [`Player`] acts as its natural roster key, so roster code never branches
//! on the game itself. An unsupported game tag is rejected when a server is
//! configured, not at roster time.

use std::collections::HashMap;
use std::str::FromStr;

use crate::core::player::Player;
use crate::error::WardenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameVariant {
    Mordhau,
    Minecraft,
}

impl GameVariant {
    pub const ALL: [GameVariant; 2] = [GameVariant::Mordhau, GameVariant::Minecraft];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Mordhau => "mordhau",
            GameVariant::Minecraft => "minecraft",
        }
    }
}

impl FromStr for GameVariant {
    type Err = WardenError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "mordhau" => Ok(GameVariant::Mordhau),
            "minecraft" => Ok(GameVariant::Minecraft),
            other => Err(WardenError::UnknownGame(other.to_string())),
        }
    }
}

/// Per-variant capabilities. Currently only the roster key resolver, but
/// this is the seam where per-game chat formats and command dialects hang.
pub struct GameDescriptor {
    pub variant: GameVariant,
    player_game_id: fn(&Player) -> String,
}

impl GameDescriptor {
    /// Resolve the roster key for a player under this variant.
    pub fn player_game_id(&self, player: &Player) -> String {
        (self.player_game_id)(player)
    }
}

/// Lookup table from variant to descriptor, built exhaustively at startup.
/// A missing descriptor is impossible by construction.
pub struct GameRegistry {
    descriptors: HashMap<GameVariant, GameDescriptor>,
}

impl GameRegistry {
    pub fn new() -> Self {
        let mut descriptors = HashMap::new();

        for variant in GameVariant::ALL {
            let descriptor = match variant {
                GameVariant::Mordhau => GameDescriptor {
                    variant,
                    player_game_id: |player| player.platform_id.clone(),
                },
                GameVariant::Minecraft => GameDescriptor {
                    variant,
                    player_game_id: |player| player.current_name.clone(),
                },
            };

            descriptors.insert(variant, descriptor);
        }

        Self { descriptors }
    }

    pub fn descriptor(&self, variant: GameVariant) -> &GameDescriptor {
        // Every variant is inserted in new(); the expect cannot fire.
        self.descriptors
            .get(&variant)
            .expect("game registry is built over every variant")
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parsing() {
        assert_eq!("mordhau".parse::<GameVariant>().unwrap(), GameVariant::Mordhau);
        assert_eq!("Minecraft".parse::<GameVariant>().unwrap(), GameVariant::Minecraft);
        assert!("quake".parse::<GameVariant>().is_err());
    }

    #[test]
    fn test_registry_covers_every_variant() {
        let registry = GameRegistry::new();
        for variant in GameVariant::ALL {
            assert_eq!(registry.descriptor(variant).variant, variant);
        }
    }

    #[test]
    fn test_roster_keys_per_variant() {
        let registry = GameRegistry::new();
        let player = Player::new(1, "pf-1", "Steve");

        let mordhau = registry.descriptor(GameVariant::Mordhau);
        assert_eq!(mordhau.player_game_id(&player), "pf-1");

        let minecraft = registry.descriptor(GameVariant::Minecraft);
        assert_eq!(minecraft.player_game_id(&player), "Steve");
    }
}
