//! Canonical dot-path constructors.
//!
//! Resolvers never format patch paths by hand; these builders are the single
//! source of the wire vocabulary and stay in lockstep with the parser in
//! [`crate::state::patch`].

pub fn clock() -> String {
    "instance.clock".to_string()
}

pub fn money() -> String {
    "instance.money".to_string()
}

pub fn global_inventory_item(item: &str) -> String {
    format!("instance.inventory.{item}")
}

pub fn location_inventory_item(location: &str, item: &str) -> String {
    format!("instance.locations.{location}.inventory.{item}")
}

pub fn character_field(character: &str, field: &str) -> String {
    format!("instance.characters.{character}.{field}")
}

pub fn character_stat(character: &str, stat: &str) -> String {
    format!("instance.characters.{character}.stats.{stat}")
}

pub fn element_instance(location: &str, id: &str) -> String {
    format!("instance.locations.{location}.elementInstances.{id}")
}

pub fn element_instance_field(location: &str, id: &str, field: &str) -> String {
    format!("instance.locations.{location}.elementInstances.{id}.{field}")
}

pub fn completed_quest(quest_id: &str) -> String {
    format!("instance.completedQuests.{quest_id}")
}
