//! Deterministic encounter generation.
//!
//! `(stage, progress)` fully determines the encounter: the same character
//! state always faces the same monster, so the server can regenerate the
//! active encounter from the persisted row instead of storing it.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::GameError;
use crate::monsters::templates::{self, Role};

/// Monster power tier. Elite and Boss multiply the template's scaled
/// stats; the multiplier also applies to the gold reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Normal,
    Elite,
    Boss,
}

impl Grade {
    pub fn multiplier(&self) -> f64 {
        match self {
            Grade::Normal => 1.0,
            Grade::Elite => ELITE_STAT_MULTIPLIER,
            Grade::Boss => BOSS_STAT_MULTIPLIER,
        }
    }
}

/// An active encounter. Ephemeral: regenerated whenever (stage, progress)
/// changes; only `current_hp` mutates during its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    pub grade: Grade,
    pub max_hp: u64,
    /// Fractional so sub-point dps ticks accumulate; clamped at zero.
    pub current_hp: f64,
    pub attack_power: u64,
    pub attack_speed: f64,
    pub gold_reward: u64,
    pub stage: u32,
}

impl Encounter {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.current_hp = (self.current_hp - amount).max(0.0);
    }
}

/// Regular-monster kills needed before the stage boss spawns. Stage N
/// demands N kills.
pub fn kills_required(stage: u32) -> u32 {
    stage
}

/// Materializes the encounter for a character's stage and kill progress.
///
/// `progress >= kills_required(stage)` yields the stage boss; otherwise a
/// regular monster, upgraded to Elite on every fifth kill of the stage.
pub fn monster_for_stage(stage: u32, progress: u32) -> Result<Encounter, GameError> {
    if stage < 1 {
        return Err(GameError::InvalidStage(stage));
    }

    let quota = kills_required(stage);
    let group_index = (((stage - 1) / STAGES_PER_GROUP) % templates::group_count()) as usize;

    let (role, grade) = if progress >= quota {
        (Role::Boss, Grade::Boss)
    } else {
        let grade = if progress % ELITE_KILL_INTERVAL == ELITE_KILL_INTERVAL - 1 {
            Grade::Elite
        } else {
            Grade::Normal
        };
        (regular_role(progress, quota), grade)
    };

    let template = templates::template(group_index, role);
    let scale = STAGE_SCALING_FACTOR.powi((stage - 1) as i32) * grade.multiplier();
    let max_hp = (template.base_hp as f64 * scale).floor() as u64;

    let name = match grade {
        Grade::Elite => format!("Elite {}", template.name),
        _ => template.name.to_string(),
    };

    Ok(Encounter {
        name,
        grade,
        max_hp,
        current_hp: max_hp as f64,
        attack_power: (template.base_attack as f64 * scale).floor() as u64,
        attack_speed: template.attack_speed,
        gold_reward: (template.base_gold as f64 * scale).floor() as u64,
        stage,
    })
}

/// Maps kill progress to a regular-monster tier: a stage ramps from its
/// group's weakest template in the first third of the quota to the
/// strongest in the last third.
fn regular_role(progress: u32, quota: u32) -> Role {
    match (progress * 3 / quota.max(1)).min(2) {
        0 => Role::Weak,
        1 => Role::Medium,
        _ => Role::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_one_first_monster_is_unscaled() {
        let encounter = monster_for_stage(1, 0).unwrap();
        assert_eq!(encounter.grade, Grade::Normal);
        assert_eq!(encounter.name, "Slime");
        // 1.25^0 * 1 leaves the template base untouched
        assert_eq!(encounter.max_hp, 10);
        assert_eq!(encounter.current_hp, 10.0);
        assert_eq!(encounter.attack_power, 2);
        assert_eq!(encounter.gold_reward, 2);
    }

    #[test]
    fn test_boss_at_quota_never_before() {
        for stage in 1..=20 {
            let quota = kills_required(stage);
            for progress in 0..quota {
                let encounter = monster_for_stage(stage, progress).unwrap();
                assert_ne!(
                    encounter.grade,
                    Grade::Boss,
                    "stage {stage} progress {progress} spawned a boss early"
                );
            }
            let boss = monster_for_stage(stage, quota).unwrap();
            assert_eq!(boss.grade, Grade::Boss);
        }
    }

    #[test]
    fn test_stage_one_boss() {
        // stage 1 needs a single kill, then the boss
        let boss = monster_for_stage(1, 1).unwrap();
        assert_eq!(boss.grade, Grade::Boss);
        assert_eq!(boss.name, "Orc Chieftain");
        assert_eq!(boss.max_hp, 1000); // 100 * 1.25^0 * 10
        assert_eq!(boss.gold_reward, 500);
    }

    #[test]
    fn test_every_fifth_kill_is_elite() {
        // stage 12 has a 12-kill quota, so indices 4 and 9 are elite
        for progress in 0..12 {
            let encounter = monster_for_stage(12, progress).unwrap();
            if progress % 5 == 4 {
                assert_eq!(encounter.grade, Grade::Elite, "progress {progress}");
                assert!(encounter.name.starts_with("Elite "));
            } else {
                assert_eq!(encounter.grade, Grade::Normal, "progress {progress}");
            }
        }
    }

    #[test]
    fn test_elite_triples_scaled_stats() {
        // stage 12 sits in the Demon group; progress 4 and 5 both fall in
        // the middle third of the 12-kill quota, same template
        let elite = monster_for_stage(12, 4).unwrap();
        let normal = monster_for_stage(12, 5).unwrap();
        assert_eq!(normal.name, "Demon Warrior");
        assert_eq!(elite.name, "Elite Demon Warrior");

        let scale = 1.25f64.powi(11);
        assert_eq!(normal.max_hp, (80.0 * scale).floor() as u64);
        assert_eq!(elite.max_hp, (80.0 * scale * 3.0).floor() as u64);
    }

    #[test]
    fn test_group_rotates_every_five_stages() {
        assert_eq!(monster_for_stage(1, 0).unwrap().name, "Slime");
        assert_eq!(monster_for_stage(5, 0).unwrap().name, "Slime");
        assert_eq!(monster_for_stage(6, 0).unwrap().name, "Skeleton Soldier");
        assert_eq!(monster_for_stage(11, 0).unwrap().name, "Imp");
        // wraps back to the first group
        assert_eq!(monster_for_stage(16, 0).unwrap().name, "Slime");
    }

    #[test]
    fn test_role_ramps_across_stage_quota() {
        // stage 9: quota 9, thirds of three kills each
        assert_eq!(monster_for_stage(9, 0).unwrap().name, "Skeleton Soldier");
        assert_eq!(monster_for_stage(9, 2).unwrap().name, "Skeleton Soldier");
        assert_eq!(monster_for_stage(9, 3).unwrap().name, "Zombie");
        assert_eq!(monster_for_stage(9, 5).unwrap().name, "Zombie");
        assert_eq!(monster_for_stage(9, 6).unwrap().name, "Ghoul");
        assert_eq!(monster_for_stage(9, 8).unwrap().name, "Ghoul");
    }

    #[test]
    fn test_exponential_stage_scaling() {
        let early = monster_for_stage(1, 0).unwrap();
        let late = monster_for_stage(16, 0).unwrap(); // same template, 1.25^15
        assert_eq!(late.max_hp, (10.0 * 1.25f64.powi(15)).floor() as u64);
        assert!(late.max_hp > early.max_hp * 20);
    }

    #[test]
    fn test_attack_speed_not_scaled() {
        let early = monster_for_stage(1, 0).unwrap();
        let late = monster_for_stage(16, 0).unwrap();
        assert_eq!(early.attack_speed, late.attack_speed);
        assert_eq!(early.attack_speed, 0.8);
    }

    #[test]
    fn test_stage_zero_rejected() {
        assert_eq!(monster_for_stage(0, 0), Err(GameError::InvalidStage(0)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = monster_for_stage(7, 3).unwrap();
        let b = monster_for_stage(7, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut encounter = monster_for_stage(1, 0).unwrap();
        encounter.take_damage(5.5);
        assert!((encounter.current_hp - 4.5).abs() < 1e-12);
        encounter.take_damage(100.0);
        assert_eq!(encounter.current_hp, 0.0);
        assert!(!encounter.is_alive());
    }
}
