use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

pub const ALL: &str = "all";
pub const COLLIDABLE: &str = "collidable";
pub const PATHABLE: &str = "pathable";
pub const ITEMS: &str = "items";
pub const DAMAGE: &str = "damage";
pub const CLOUDS: &str = "clouds";
pub const NODES: &str = "nodes";

/// Named groups an entity belongs to. Every entity is in [`ALL`].
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Groups(SmallVec<[&'static str; 4]>);

impl Default for Groups {
    fn default() -> Self {
        Self::new()
    }
}

impl Groups {
    pub fn new() -> Self {
        let mut names = SmallVec::new();
        names.push(ALL);
        Groups(names)
    }

    pub fn with(mut self, name: &'static str) -> Self {
        if !self.contains(name) {
            self.0.push(name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|g| *g == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_groups_contain_all() {
        let groups = Groups::new();
        assert!(groups.contains(ALL));
        assert!(!groups.contains(COLLIDABLE));
    }

    #[test]
    fn with_does_not_duplicate() {
        let groups = Groups::new().with(ITEMS).with(ITEMS).with(ALL);
        assert_eq!(groups.iter().count(), 2);
    }
}
