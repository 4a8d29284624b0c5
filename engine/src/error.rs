use thiserror::Error;

/// Problems with weapon/zone tables, built-in or user supplied.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed weapon table: {0}")]
    Weapons(#[from] serde_json::Error),
    #[error("malformed zone table: {0}")]
    Zones(#[from] serde_yaml::Error),
    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),
    #[error("unknown zone {0}")]
    UnknownZone(u32),
    #[error("zone {0} has no enemies")]
    EmptyZone(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("battle still undecided after {turns} turns")]
    TurnLimit { turns: u32 },
}
