//! Simulation report generation.

use super::runner::RunStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_stage: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub avg_highest_stage: f64,
    pub avg_stages_cleared: f64,
    pub avg_total_kills: f64,
    pub avg_boss_kills: f64,
    pub avg_party_defeats: f64,
    pub avg_member_deaths: f64,
    pub avg_turns_to_complete: f64,
    pub avg_final_level: f64,
    pub crit_rate: f64,

    // Economy
    pub avg_loot_drops: f64,
    pub avg_items_bought: f64,
    pub avg_potions_used: f64,
    pub avg_gold_spent: f64,

    // Distribution data
    pub stage_distribution: BTreeMap<u32, u32>,
    pub defeat_distribution: Vec<u32>,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn average<F: Fn(&RunStats) -> f64>(runs: &[RunStats], f: F) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_stage: u32, max_turns: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.total_turns >= max_turns)
            .count() as u32;

        let avg_turns_to_complete = runs
            .iter()
            .filter(|r| r.reached_target)
            .map(|r| r.total_turns as f64)
            .sum::<f64>()
            / runs_completed.max(1) as f64;

        let total_turns: u64 = runs.iter().map(|r| r.total_turns).sum();
        let total_crits: u64 = runs.iter().map(|r| r.critical_hits).sum();
        let crit_rate = if total_turns > 0 {
            total_crits as f64 / total_turns as f64
        } else {
            0.0
        };

        let mut stage_distribution = BTreeMap::new();
        for run in &runs {
            *stage_distribution.entry(run.highest_stage).or_insert(0) += 1;
        }

        Self {
            num_runs,
            target_stage,
            runs_completed,
            runs_timed_out,
            avg_highest_stage: average(&runs, |r| r.highest_stage as f64),
            avg_stages_cleared: average(&runs, |r| r.stages_cleared as f64),
            avg_total_kills: average(&runs, |r| r.total_kills as f64),
            avg_boss_kills: average(&runs, |r| r.boss_kills as f64),
            avg_party_defeats: average(&runs, |r| r.party_defeats as f64),
            avg_member_deaths: average(&runs, |r| r.member_deaths as f64),
            avg_turns_to_complete,
            avg_final_level: average(&runs, |r| {
                let levels = &r.final_levels;
                levels.iter().sum::<u32>() as f64 / levels.len().max(1) as f64
            }),
            crit_rate,
            avg_loot_drops: average(&runs, |r| r.loot_drops as f64),
            avg_items_bought: average(&runs, |r| r.items_bought as f64),
            avg_potions_used: average(&runs, |r| r.potions_used as f64),
            avg_gold_spent: average(&runs, |r| r.gold_spent as f64),
            stage_distribution,
            defeat_distribution: runs.iter().map(|r| r.party_defeats).collect(),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("               (Autopilot on the Real Engine)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached stage {}, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.target_stage, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Best Stage:      {:.1}\n",
            self.avg_highest_stage
        ));
        report.push_str(&format!(
            "  Avg Stages Cleared:  {:.1}\n",
            self.avg_stages_cleared
        ));
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Turns to Target: {:.0}\n\n",
            self.avg_turns_to_complete
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Kills:           {:.1}\n",
            self.avg_total_kills
        ));
        report.push_str(&format!(
            "  Avg Boss Kills:      {:.1}\n",
            self.avg_boss_kills
        ));
        report.push_str(&format!(
            "  Avg Member Deaths:   {:.1}\n",
            self.avg_member_deaths
        ));
        report.push_str(&format!(
            "  Avg Party Wipes:     {:.1}\n",
            self.avg_party_defeats
        ));
        report.push_str(&format!(
            "  Crits per Turn:      {:.1}%\n\n",
            self.crit_rate * 100.0
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Loot Drops:      {:.1}\n",
            self.avg_loot_drops
        ));
        report.push_str(&format!(
            "  Avg Items Bought:    {:.1}\n",
            self.avg_items_bought
        ));
        report.push_str(&format!(
            "  Avg Potions Used:    {:.1}\n",
            self.avg_potions_used
        ));
        report.push_str(&format!(
            "  Avg Gold Spent:      {:.0}\n\n",
            self.avg_gold_spent
        ));

        report.push_str("── BEST STAGE REACHED ───────────────────────────────────────────\n");
        for (stage, count) in &self.stage_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Stage {:2}: {:>5.1}% {}\n", stage, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let completion_rate = (self.runs_completed as f64 / self.num_runs.max(1) as f64) * 100.0;
        let wipe_rating = if self.avg_party_defeats < 0.5 {
            "TOO EASY - Parties rarely wipe"
        } else if self.avg_party_defeats < 3.0 {
            "GOOD - Challenging but fair"
        } else if self.avg_party_defeats < 10.0 {
            "HARD - Many wipes but completable"
        } else {
            "TOO HARD - Excessive wipes"
        };
        report.push_str(&format!("  Completion Rate: {:.1}%\n", completion_rate));
        report.push_str(&format!("  Wipe Rating:     {}\n", wipe_rating));

        report
    }

    /// Pretty JSON export of the whole report.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(highest_stage: u32, reached_target: bool, defeats: u32) -> RunStats {
        RunStats {
            final_stage: highest_stage,
            highest_stage,
            stages_cleared: highest_stage - 1,
            bosses_defeated: (highest_stage - 1) / 3,
            party_defeats: defeats,
            total_turns: 100,
            total_kills: 10,
            boss_kills: 1,
            member_deaths: 2,
            critical_hits: 20,
            loot_drops: 4,
            items_bought: 3,
            potions_used: 2,
            gold_spent: 90,
            final_levels: vec![3, 5],
            reached_target,
        }
    }

    #[test]
    fn test_report_aggregates() {
        let report = SimReport::from_runs(vec![run(5, true, 0), run(3, false, 2)], 5, 1_000);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_completed, 1);
        assert_eq!(report.runs_timed_out, 0);
        assert!((report.avg_highest_stage - 4.0).abs() < 1e-9);
        assert!((report.avg_final_level - 4.0).abs() < 1e-9);
        assert!((report.crit_rate - 0.2).abs() < 1e-9);
        assert_eq!(report.stage_distribution.get(&5), Some(&1));
        assert_eq!(report.defeat_distribution, vec![0, 2]);
    }

    #[test]
    fn test_report_text_and_json() {
        let report = SimReport::from_runs(vec![run(4, true, 1)], 4, 100);
        let text = report.to_text();
        assert!(text.contains("SIMULATION REPORT"));
        assert!(text.contains("1 reached stage 4"));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"runs_completed\": 1"));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), 10, 100);
        assert_eq!(report.avg_total_kills, 0.0);
        assert!(report.to_text().contains("0 reached"));
    }
}
