//! The turn-based engine.
//!
//! [`Game`] owns the party, the current encounter, the stage counter and the
//! dice. Commands either succeed with an [`ActionReport`] or fail with an
//! [`ActionError`] and leave the game untouched.
//!
//! A round works like this: each living party member acts once, in party
//! order, tracked by `active_member`. The command issued by the last member of
//! the round also runs the monster phase before returning. If the last
//! monster falls during a member's action the battle ends right there, no
//! monster acts, and the game waits in [`Phase::StageCleared`] until
//! [`Game::start_next_stage`] is called.

use super::config::{GameConfig, XpShare};
use super::constants::{VICTORY_GOLD_PER_STAGE, VICTORY_XP_PER_STAGE};
use super::dice::Dice;
use super::error::{invariant_violation, ActionError};
use super::snapshot::{GameSnapshot, MemberSnapshot, MonsterSnapshot, PartySnapshot};
use super::turn::{ActionReport, Phase, TurnEvent, VictoryReport};
use crate::character::{LevelUpReport, Monster};
use crate::combat::{
    handle_monster_defeat, monster_act, resolve_attack, resolve_special, settle, AttackOutcome,
    Choice, CombatLog, MemberRequest, Selector, TargetRequest,
};
use crate::items::{EquipmentSlot, ItemId, ItemKind};
use crate::party::Party;
use crate::stage::{generate_encounter, is_boss_stage, StageProgression};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct Game<D: Dice = ChaCha8Rng> {
    config: GameConfig,
    party: Party,
    monsters: Vec<Monster>,
    progression: StageProgression,
    phase: Phase,
    active_member: usize,
    log: CombatLog,
    /// Drops collected since the current stage began.
    encounter_loot: Vec<ItemId>,
    dice: D,
}

impl Game<ChaCha8Rng> {
    /// New session seeded from `config.seed`, or from entropy when unset.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_dice(config, rng)
    }
}

fn fresh_party(config: &GameConfig) -> Party {
    Party::from_classes(
        &config.party_classes(),
        config.level_growth,
        config.level_up_heal,
        config.starting_gold,
    )
}

impl<D: Dice> Game<D> {
    pub fn with_dice(config: GameConfig, dice: D) -> Self {
        let party = fresh_party(&config);
        let mut game = Self {
            config,
            party,
            monsters: Vec::new(),
            progression: StageProgression::new(),
            phase: Phase::Battle,
            active_member: 0,
            log: CombatLog::new(),
            encounter_loot: Vec::new(),
            dice,
        };
        game.begin_stage();
        game
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    /// Direct party access for scenario setup and tooling.
    pub fn party_mut(&mut self) -> &mut Party {
        &mut self.party
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Direct encounter access for scenario setup and tooling.
    pub fn monsters_mut(&mut self) -> &mut Vec<Monster> {
        &mut self.monsters
    }

    pub fn stage(&self) -> u32 {
        self.progression.stage
    }

    pub fn progression(&self) -> &StageProgression {
        &self.progression
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the party member whose turn it is.
    pub fn active_member(&self) -> usize {
        self.active_member
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn encounter_loot(&self) -> &[ItemId] {
        &self.encounter_loot
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            stage: self.progression.stage,
            phase: self.phase,
            active_member: self.active_member,
            members: self.party.members.iter().map(MemberSnapshot::from).collect(),
            monsters: self.monsters.iter().map(MonsterSnapshot::from).collect(),
            party: PartySnapshot::from(&self.party),
            log: self.log.iter().cloned().collect(),
        }
    }

    // ── Battle commands ─────────────────────────────────────────

    /// Active member attacks a monster picked through `selector`.
    pub fn player_attack(&mut self, selector: &mut impl Selector) -> Result<ActionReport, ActionError> {
        let member = self.ensure_member_turn()?;
        let target = self.pick_target(member, false, selector);
        let outcome = resolve_attack(
            &self.party.members[member].combatant,
            &mut self.monsters[target].combatant,
            &mut self.dice,
        );
        let mut report = ActionReport::default();
        self.finish_member_attack(member, target, outcome, &mut report);
        Ok(report)
    }

    /// Active member uses its special attack. Rejected before any target is
    /// requested when MP is short.
    pub fn player_special_attack(
        &mut self,
        selector: &mut impl Selector,
    ) -> Result<ActionReport, ActionError> {
        let member = self.ensure_member_turn()?;
        let attacker = &self.party.members[member].combatant;
        let cost = attacker.profile().special_mp_cost;
        if attacker.mp < cost {
            return Err(ActionError::InsufficientMp {
                needed: cost,
                available: attacker.mp,
            });
        }
        let target = self.pick_target(member, true, selector);
        let outcome = resolve_special(
            &mut self.party.members[member].combatant,
            &mut self.monsters[target].combatant,
            &mut self.dice,
        )?;
        let mut report = ActionReport::default();
        self.finish_member_attack(member, target, outcome, &mut report);
        Ok(report)
    }

    /// Active member braces; monster damage against it is halved until the
    /// end of the next monster phase.
    pub fn player_defend(&mut self) -> Result<ActionReport, ActionError> {
        let member = self.ensure_member_turn()?;
        let combatant = &mut self.party.members[member].combatant;
        combatant.defending = true;
        let message = format!("{} takes a defensive stance!", combatant.name);
        tracing::debug!(member, "defend");
        self.log.push(message.clone(), false, true);

        let mut report = ActionReport::default();
        report.push(TurnEvent::MemberDefend { member, message });
        self.advance_turn(&mut report);
        Ok(report)
    }

    /// Generates the next encounter after a cleared stage.
    pub fn start_next_stage(&mut self) -> Result<ActionReport, ActionError> {
        if self.phase != Phase::StageCleared {
            return Err(invariant_violation(ActionError::NotYourTurn));
        }
        let mut report = ActionReport::default();
        report.push(self.begin_stage());
        Ok(report)
    }

    // ── Out-of-turn commands ────────────────────────────────────
    // These never consume the active member's turn.

    pub fn upgrade_stat(&mut self, member: usize, stat: &str) -> Result<ActionReport, ActionError> {
        let player = self.party.member_mut(member)?;
        let stat = player.upgrade_stat_named(stat)?;
        let points_left = player.upgrade_points;
        let message = format!(
            "{}'s {} increased! Points left: {}",
            player.name(),
            stat,
            points_left
        );
        self.log.push(message.clone(), false, true);

        let mut report = ActionReport::default();
        report.push(TurnEvent::StatUpgraded {
            member,
            stat,
            points_left,
            message,
        });
        Ok(report)
    }

    /// Equips or drinks `item`. When `member` is `None` and the party has more
    /// than one member, the selector is asked who receives it.
    pub fn equip_or_use_item(
        &mut self,
        item: ItemId,
        member: Option<usize>,
        selector: &mut impl Selector,
    ) -> Result<ActionReport, ActionError> {
        let member = match member {
            Some(index) => {
                self.party.member(index)?;
                index
            }
            None => self.pick_member(item, selector)?,
        };
        let outcome = self.party.equip_or_use(member, item)?;
        let message = outcome.describe(&self.party);
        self.log.push(message.clone(), false, true);

        let mut report = ActionReport::default();
        report.push(TurnEvent::ItemUsed { outcome, message });
        Ok(report)
    }

    pub fn unequip(&mut self, member: usize, slot: &str) -> Result<ActionReport, ActionError> {
        let slot = slot
            .parse::<EquipmentSlot>()
            .map_err(ActionError::InvalidSlot)?;
        let item = self.party.unequip(member, slot)?;
        let message = format!(
            "{} removed {} from the {} slot.",
            self.party.members[member].name(),
            item,
            slot
        );
        self.log.push(message.clone(), false, true);

        let mut report = ActionReport::default();
        report.push(TurnEvent::Unequipped {
            member,
            item,
            slot,
            message,
        });
        Ok(report)
    }

    pub fn buy_item(&mut self, item: ItemId) -> Result<ActionReport, ActionError> {
        let gold_left = self.party.buy_item(item)?;
        let message = format!(
            "Bought {} for {} gold. {} gold left.",
            item,
            item.item().price,
            gold_left
        );
        self.log.push(message.clone(), false, true);

        let mut report = ActionReport::default();
        report.push(TurnEvent::ItemBought {
            item,
            gold_left,
            message,
        });
        Ok(report)
    }

    // ── Internals ───────────────────────────────────────────────

    fn ensure_member_turn(&self) -> Result<usize, ActionError> {
        if self.phase != Phase::Battle {
            return Err(invariant_violation(ActionError::NotYourTurn));
        }
        match self.party.members.get(self.active_member) {
            Some(player) if player.is_alive() => Ok(self.active_member),
            _ => Err(invariant_violation(ActionError::NotYourTurn)),
        }
    }

    fn pick_target(&self, member: usize, special: bool, selector: &mut impl Selector) -> usize {
        let candidates: Vec<Choice> = self
            .monsters
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_alive())
            .map(|(index, m)| Choice {
                index,
                label: m.name().to_string(),
            })
            .collect();
        if candidates.len() <= 1 {
            return settle(&candidates, None);
        }
        let request = TargetRequest {
            attacker: self.party.members[member].name().to_string(),
            special,
            candidates,
        };
        let answer = selector.choose_target(&request);
        settle(&request.candidates, answer)
    }

    /// Resolves who receives `item`. The selector is only consulted when more
    /// than one member could take it.
    fn pick_member(
        &self,
        item: ItemId,
        selector: &mut impl Selector,
    ) -> Result<usize, ActionError> {
        if self.party.len() <= 1 {
            return Ok(0);
        }
        let wants_dead = match item.item().kind {
            ItemKind::Potion(effect) => Some(effect.revives),
            ItemKind::Equipment(_) => None,
        };
        let candidates: Vec<Choice> = self
            .party
            .members
            .iter()
            .enumerate()
            .filter(|(_, p)| match wants_dead {
                Some(revives) => p.is_alive() != revives,
                None => true,
            })
            .map(|(index, p)| Choice {
                index,
                label: p.name().to_string(),
            })
            .collect();
        match candidates.as_slice() {
            [] => Err(ActionError::NoEligibleMember {
                item: item.name().to_string(),
            }),
            [only] => Ok(only.index),
            _ => {
                let request = MemberRequest { item, candidates };
                let answer = selector.choose_member(&request);
                Ok(settle(&request.candidates, answer))
            }
        }
    }

    fn finish_member_attack(
        &mut self,
        member: usize,
        target: usize,
        outcome: AttackOutcome,
        report: &mut ActionReport,
    ) {
        let message = outcome.describe();
        tracing::debug!(
            member,
            target,
            damage = outcome.damage,
            evaded = outcome.evaded,
            critical = outcome.critical,
            "member attack"
        );
        self.log.push(message.clone(), outcome.critical, true);
        let killed = outcome.killed;
        report.push(TurnEvent::MemberAttack {
            member,
            outcome,
            message,
        });

        if killed {
            self.on_monster_killed(member, target, report);
        }
        if self.monsters.iter().all(|m| !m.is_alive()) {
            self.on_victory(report);
            return;
        }
        self.advance_turn(report);
    }

    fn on_monster_killed(&mut self, member: usize, target: usize, report: &mut ActionReport) {
        let kill = handle_monster_defeat(
            &mut self.party.members[member],
            member,
            &self.monsters[target],
            &mut self.dice,
        );
        self.party.add_items(&kill.loot);
        self.encounter_loot.extend(kill.loot.iter().copied());

        let message = kill.describe(self.party.members[member].name());
        self.log.push(message.clone(), false, true);
        let level_up = kill.level_up;
        report.push(TurnEvent::MonsterDefeated { kill, message });
        if level_up.leveled_up() {
            self.push_level_up(member, level_up, report);
        }
    }

    fn push_level_up(&mut self, member: usize, level_up: LevelUpReport, report: &mut ActionReport) {
        let message = format!(
            "{} reached level {}! (+{} upgrade points)",
            self.party.members[member].name(),
            level_up.new_level,
            level_up.points_gained
        );
        self.log.push(message.clone(), false, true);
        report.push(TurnEvent::LevelUp {
            member,
            report: level_up,
            message,
        });
    }

    /// Moves to the next living member, or runs the monster phase when the
    /// round is over.
    fn advance_turn(&mut self, report: &mut ActionReport) {
        let next = self
            .party
            .members
            .iter()
            .enumerate()
            .skip(self.active_member + 1)
            .find(|(_, p)| p.is_alive())
            .map(|(index, _)| index);
        match next {
            Some(index) => self.active_member = index,
            None => self.monster_phase(report),
        }
    }

    fn monster_phase(&mut self, report: &mut ActionReport) {
        for index in 0..self.monsters.len() {
            if !self.monsters[index].is_alive() {
                continue;
            }
            let living = self.party.living_indices();
            if living.is_empty() {
                break;
            }
            let target = living[self.dice.pick_index(living.len())];
            let outcome = monster_act(
                &mut self.monsters[index].combatant,
                &mut self.party.members[target].combatant,
                &mut self.dice,
            );
            let message = outcome.describe();
            tracing::debug!(
                monster = index,
                target,
                damage = outcome.damage,
                evaded = outcome.evaded,
                "monster attack"
            );
            self.log.push(message.clone(), false, false);
            let killed = outcome.killed;
            report.push(TurnEvent::MonsterAttack {
                monster: index,
                target,
                outcome,
                message,
            });

            if killed {
                let message = format!("{} has fallen!", self.party.members[target].name());
                self.log.push(message.clone(), false, false);
                report.push(TurnEvent::MemberDefeated {
                    member: target,
                    message,
                });
            }
            if self.party.is_defeated() {
                self.on_defeat(report);
                return;
            }
        }

        self.clear_defending();
        self.active_member = self.party.first_living().unwrap_or(0);
    }

    fn on_victory(&mut self, report: &mut ActionReport) {
        let stage = self.progression.stage;
        let xp_each = VICTORY_XP_PER_STAGE * stage;
        let gold = VICTORY_GOLD_PER_STAGE * stage;
        let recipients: Vec<usize> = match self.config.xp_share {
            XpShare::LivingMembers => self.party.living_indices(),
            XpShare::AllMembers => (0..self.party.len()).collect(),
        };

        let mut level_ups = Vec::new();
        for &index in &recipients {
            let level_up = self.party.members[index].gain_xp(xp_each);
            if level_up.leveled_up() {
                level_ups.push((index, level_up));
            }
        }
        self.party.gold += gold;
        let next_stage = self.progression.advance();
        self.phase = Phase::StageCleared;
        self.clear_defending();
        let loot = std::mem::take(&mut self.encounter_loot);

        let loot_text = if loot.is_empty() {
            "none".to_string()
        } else {
            loot.iter().map(|id| id.name()).collect::<Vec<_>>().join(", ")
        };
        let message = format!(
            "Victory! Stage {} cleared: +{} XP, +{} gold. Loot: {}.",
            stage, xp_each, gold, loot_text
        );
        tracing::info!(stage, xp_each, gold, drops = loot.len(), "stage cleared");
        self.log.push(message.clone(), false, true);
        report.push(TurnEvent::Victory {
            report: VictoryReport {
                stage_cleared: stage,
                next_stage,
                xp_each,
                xp_recipients: recipients,
                gold,
                loot,
            },
            message,
        });
        for (index, level_up) in level_ups {
            self.push_level_up(index, level_up, report);
        }
    }

    fn on_defeat(&mut self, report: &mut ActionReport) {
        let stage_reached = self.progression.stage;
        tracing::info!(stage = stage_reached, "party defeated");
        let message = format!(
            "The party has fallen on stage {}. A new party sets out from stage 1.",
            stage_reached
        );
        self.log.push(message.clone(), false, false);
        report.push(TurnEvent::PartyDefeated {
            stage_reached,
            message,
        });

        self.progression.reset();
        self.party = fresh_party(&self.config);
        report.push(self.begin_stage());
    }

    fn begin_stage(&mut self) -> TurnEvent {
        let stage = self.progression.stage;
        self.monsters = generate_encounter(stage, self.config.monster_count);
        self.phase = Phase::Battle;
        self.encounter_loot.clear();
        self.clear_defending();
        self.active_member = self.party.first_living().unwrap_or(0);

        let boss = is_boss_stage(stage);
        let monsters: Vec<String> = self.monsters.iter().map(|m| m.name().to_string()).collect();
        let message = if boss {
            format!("Stage {}: {} appears!", stage, monsters.join(", "))
        } else {
            format!("Stage {}: {} appear!", stage, monsters.join(", "))
        };
        tracing::info!(stage, boss, count = monsters.len(), "stage started");
        self.log.push(message.clone(), false, false);
        TurnEvent::StageStarted {
            stage,
            boss,
            monsters,
            message,
        }
    }

    fn clear_defending(&mut self) {
        for player in &mut self.party.members {
            player.combatant.defending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{FirstChoice, FixedChoice};
    use crate::core::dice::scripted::ScriptedDice;

    fn solo(dice: ScriptedDice) -> Game<ScriptedDice> {
        Game::with_dice(GameConfig::solo(), dice)
    }

    #[test]
    fn test_new_game_starts_stage_one() {
        let game = Game::new(GameConfig::party().with_seed(1));
        assert_eq!(game.stage(), 1);
        assert_eq!(game.phase(), Phase::Battle);
        assert_eq!(game.monsters().len(), 1);
        assert_eq!(game.party().len(), 2);
        assert_eq!(game.active_member(), 0);
    }

    #[test]
    fn test_attack_then_monster_phase() {
        // Hero hits (50 > 12), no crit (0.9); monster attacks (0.9), hits (100)
        let dice = ScriptedDice::new().percents(&[50, 100]).units(&[0.9, 0.9]);
        let mut game = solo(dice);
        let report = game.player_attack(&mut FirstChoice).unwrap();
        // 20 attack - 11 defense
        assert_eq!(game.monsters()[0].combatant.hp, 51);
        assert_eq!(report.monster_attacks().count(), 1);
        // 20 attack - 10 defense
        assert_eq!(game.party().members[0].combatant.hp, 90);
        assert_eq!(game.phase(), Phase::Battle);
    }

    #[test]
    fn test_party_members_act_in_order() {
        let dice = ScriptedDice::new().percents(&[1, 1]);
        let mut game = Game::with_dice(GameConfig::party(), dice);
        let report = game.player_attack(&mut FirstChoice).unwrap();
        assert_eq!(report.monster_attacks().count(), 0);
        assert_eq!(game.active_member(), 1);
        let report = game.player_defend().unwrap();
        assert_eq!(report.monster_attacks().count(), 1);
        assert_eq!(game.active_member(), 0);
        // Defend wears off after the monster phase
        assert!(!game.party().members[1].combatant.defending);
    }

    #[test]
    fn test_special_without_mp_consumes_nothing() {
        let mut game = solo(ScriptedDice::new());
        game.party_mut().members[0].combatant.mp = 10;
        let err = game.player_special_attack(&mut FirstChoice).unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientMp {
                needed: 15,
                available: 10
            }
        );
        assert_eq!(game.party().members[0].combatant.mp, 10);
        assert_eq!(game.monsters()[0].combatant.hp, 60);
        assert_eq!(game.active_member(), 0);
    }

    #[test]
    fn test_kill_ends_battle_without_monster_turn() {
        // Hit, no crit, no loot
        let dice = ScriptedDice::new().percents(&[50]).units(&[0.9, 0.9]);
        let mut game = solo(dice);
        game.monsters_mut()[0].combatant.hp = 5;
        let report = game.player_attack(&mut FirstChoice).unwrap();
        assert_eq!(report.monster_attacks().count(), 0);
        let victory = report.victory().unwrap();
        assert_eq!(victory.stage_cleared, 1);
        assert_eq!(victory.xp_each, 25);
        assert_eq!(victory.gold, 50);
        assert_eq!(game.phase(), Phase::StageCleared);
        assert_eq!(game.stage(), 2);
        assert_eq!(game.party().gold, 50);
        // 50 kill xp + 25 victory xp
        assert_eq!(game.party().members[0].xp, 75);
    }

    #[test]
    fn test_commands_rejected_between_stages() {
        let dice = ScriptedDice::new().percents(&[50]).units(&[0.9, 0.9]);
        let mut game = solo(dice);
        game.monsters_mut()[0].combatant.hp = 1;
        game.player_attack(&mut FirstChoice).unwrap();
        if !cfg!(feature = "strict-invariants") {
            assert_eq!(
                game.player_attack(&mut FirstChoice).unwrap_err(),
                ActionError::NotYourTurn
            );
        }
        let report = game.start_next_stage().unwrap();
        assert!(matches!(
            report.events[0],
            TurnEvent::StageStarted { stage: 2, .. }
        ));
        assert_eq!(game.monsters().len(), 2);
        assert_eq!(game.phase(), Phase::Battle);
    }

    #[test]
    fn test_target_selection_used_with_two_monsters() {
        let dice = ScriptedDice::new().percents(&[50, 100, 100]).units(&[0.9, 0.9, 0.9]);
        let mut game = solo(dice);
        game.monsters_mut().push(Monster::regular(1, 2));
        game.player_attack(&mut FixedChoice::target(1)).unwrap();
        assert_eq!(game.monsters()[0].combatant.hp, 60);
        assert_eq!(game.monsters()[1].combatant.hp, 51);
    }

    #[test]
    fn test_defeat_resets_session() {
        let dice = ScriptedDice::new().percents(&[1, 100]).units(&[0.9]);
        let mut game = solo(dice);
        game.party_mut().gold = 500;
        game.party_mut().members[0].combatant.hp = 1;
        let report = game.player_attack(&mut FirstChoice).unwrap();
        assert!(report.is_defeat());
        assert_eq!(game.stage(), 1);
        assert_eq!(game.party().gold, 0);
        assert_eq!(game.party().members[0].combatant.hp, 100);
        assert_eq!(game.phase(), Phase::Battle);
        assert_eq!(game.progression().defeats, 1);
    }

    #[test]
    fn test_item_use_does_not_take_turn() {
        let mut game = Game::with_dice(GameConfig::party(), ScriptedDice::new());
        game.party_mut().inventory.add(ItemId::HealthPotion, 1);
        game.party_mut().members[1].combatant.take_damage(40);
        let report = game
            .equip_or_use_item(ItemId::HealthPotion, None, &mut FixedChoice::member(1))
            .unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(game.party().members[1].combatant.hp, 80);
        assert_eq!(game.active_member(), 0);
    }

    #[test]
    fn test_snapshot_json() {
        let game = Game::new(GameConfig::party().with_seed(3));
        let snapshot = game.snapshot();
        assert_eq!(snapshot.members.len(), 2);
        assert_eq!(snapshot.members[1].class, "Sage");
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"stage\": 1"));
        assert!(json.contains("\"max_hp\": 100"));
    }
}
