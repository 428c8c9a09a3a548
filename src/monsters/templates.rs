//! Static monster template table.
//!
//! Three themed groups, each with three regular tiers and a boss. Stage
//! scaling and grade multipliers are applied on top of these base values
//! by the generator; `attack_speed` is taken as-is.

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Weak,
    Medium,
    Strong,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub base_hp: u64,
    pub base_attack: u64,
    pub attack_speed: f64,
    pub base_gold: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterGroup {
    pub theme: &'static str,
    pub regulars: [MonsterTemplate; 3],
    pub boss: MonsterTemplate,
}

impl MonsterGroup {
    pub fn template(&self, role: Role) -> &MonsterTemplate {
        match role {
            Role::Weak => &self.regulars[0],
            Role::Medium => &self.regulars[1],
            Role::Strong => &self.regulars[2],
            Role::Boss => &self.boss,
        }
    }
}

pub const MONSTER_GROUPS: [MonsterGroup; 3] = [
    MonsterGroup {
        theme: "Forest",
        regulars: [
            MonsterTemplate {
                name: "Slime",
                base_hp: 10,
                base_attack: 2,
                attack_speed: 0.8,
                base_gold: 2,
            },
            MonsterTemplate {
                name: "Goblin",
                base_hp: 15,
                base_attack: 3,
                attack_speed: 1.0,
                base_gold: 3,
            },
            MonsterTemplate {
                name: "Wolf",
                base_hp: 20,
                base_attack: 4,
                attack_speed: 1.4,
                base_gold: 5,
            },
        ],
        boss: MonsterTemplate {
            name: "Orc Chieftain",
            base_hp: 100,
            base_attack: 8,
            attack_speed: 0.9,
            base_gold: 50,
        },
    },
    MonsterGroup {
        theme: "Undead",
        regulars: [
            MonsterTemplate {
                name: "Skeleton Soldier",
                base_hp: 30,
                base_attack: 6,
                attack_speed: 1.0,
                base_gold: 8,
            },
            MonsterTemplate {
                name: "Zombie",
                base_hp: 40,
                base_attack: 8,
                attack_speed: 0.6,
                base_gold: 10,
            },
            MonsterTemplate {
                name: "Ghoul",
                base_hp: 50,
                base_attack: 10,
                attack_speed: 1.3,
                base_gold: 12,
            },
        ],
        boss: MonsterTemplate {
            name: "Lich",
            base_hp: 250,
            base_attack: 16,
            attack_speed: 0.8,
            base_gold: 120,
        },
    },
    MonsterGroup {
        theme: "Demon",
        regulars: [
            MonsterTemplate {
                name: "Imp",
                base_hp: 60,
                base_attack: 12,
                attack_speed: 1.5,
                base_gold: 15,
            },
            MonsterTemplate {
                name: "Demon Warrior",
                base_hp: 80,
                base_attack: 15,
                attack_speed: 1.0,
                base_gold: 20,
            },
            MonsterTemplate {
                name: "Succubus",
                base_hp: 100,
                base_attack: 18,
                attack_speed: 1.2,
                base_gold: 25,
            },
        ],
        boss: MonsterTemplate {
            name: "Demon Lord",
            base_hp: 500,
            base_attack: 28,
            attack_speed: 1.0,
            base_gold: 250,
        },
    },
];

pub fn group_count() -> u32 {
    MONSTER_GROUPS.len() as u32
}

/// Looks up a template by group index and role. An out-of-range group is
/// a data inconsistency: combat stays available on the first group's
/// weakest template instead of failing the request.
pub fn template(group_index: usize, role: Role) -> &'static MonsterTemplate {
    match MONSTER_GROUPS.get(group_index) {
        Some(group) => group.template(role),
        None => {
            warn!(group_index, "monster group lookup out of range, using fallback template");
            &MONSTER_GROUPS[0].regulars[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_ramp_up_in_power() {
        for group in 1..MONSTER_GROUPS.len() {
            let previous = &MONSTER_GROUPS[group - 1];
            let current = &MONSTER_GROUPS[group];
            assert!(current.regulars[0].base_hp > previous.regulars[0].base_hp);
            assert!(current.boss.base_hp > previous.boss.base_hp);
            assert!(current.boss.base_gold > previous.boss.base_gold);
        }
    }

    #[test]
    fn test_regulars_ramp_up_within_group() {
        for group in &MONSTER_GROUPS {
            assert!(group.regulars[0].base_hp < group.regulars[1].base_hp);
            assert!(group.regulars[1].base_hp < group.regulars[2].base_hp);
            assert!(group.boss.base_hp > group.regulars[2].base_hp);
        }
    }

    #[test]
    fn test_template_lookup_by_role() {
        assert_eq!(template(0, Role::Weak).name, "Slime");
        assert_eq!(template(0, Role::Boss).name, "Orc Chieftain");
        assert_eq!(template(1, Role::Medium).name, "Zombie");
        assert_eq!(template(2, Role::Strong).name, "Succubus");
    }

    #[test]
    fn test_out_of_range_group_falls_back() {
        let fallback = template(usize::MAX, Role::Boss);
        assert_eq!(fallback.name, "Slime");
    }

    #[test]
    fn test_attack_speeds_positive() {
        for group in &MONSTER_GROUPS {
            for regular in &group.regulars {
                assert!(regular.attack_speed > 0.0);
            }
            assert!(group.boss.attack_speed > 0.0);
        }
    }
}
