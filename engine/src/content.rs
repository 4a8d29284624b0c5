use std::collections::HashMap;

use crate::error::ContentError;
use crate::zone::{Armory, ZoneBook};

const WEAPONS_JSON: &str = include_str!("../content/weapons/basic.json");
const ZONES_YAML: &str = include_str!("../content/zones/dungeon.yaml");

pub fn builtin_weapons() -> HashMap<&'static str, &'static str> {
    HashMap::from([("basic", WEAPONS_JSON)])
}

pub fn builtin_zones() -> HashMap<&'static str, &'static str> {
    HashMap::from([("dungeon", ZONES_YAML)])
}

pub fn parse_armory(text: &str) -> Result<Armory, ContentError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_zones(text: &str) -> Result<ZoneBook, ContentError> {
    Ok(serde_yaml::from_str(text)?)
}

pub fn builtin_armory() -> Result<Armory, ContentError> {
    parse_armory(WEAPONS_JSON)
}

pub fn builtin_zone_book() -> Result<ZoneBook, ContentError> {
    parse_zones(ZONES_YAML)
}
