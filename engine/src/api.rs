use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::orchestrator::{run_match, MatchEvent, RandomChooser};
use crate::roster::{random_species, Catalog, PoolRules, RosterProvider};
use crate::sample::sample_without_replacement;
use crate::{Combatant, Dice, Duel, MatchResult, Party, Rolls};

pub const DEFAULT_MAX_HP: u32 = 300;
pub const DEFAULT_POOL_SAMPLE: usize = 40;
pub const DEFAULT_MIN_VALID: usize = 5;
pub const DEFAULT_ACTIONS_PER_COMBATANT: usize = 5;
pub const DEFAULT_BOT_MAX_ID: u32 = 151;
pub const DEFAULT_PACE_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MatchConfig {
    pub max_hp: u32,
    pub pool_sample: usize,
    pub min_valid_actions: usize,
    pub actions_per_combatant: usize,
    pub bot_max_id: u32,
    pub pace_ms: u64,
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_hp: DEFAULT_MAX_HP,
            pool_sample: DEFAULT_POOL_SAMPLE,
            min_valid_actions: DEFAULT_MIN_VALID,
            actions_per_combatant: DEFAULT_ACTIONS_PER_COMBATANT,
            bot_max_id: DEFAULT_BOT_MAX_ID,
            pace_ms: DEFAULT_PACE_MS,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn pool_rules(&self) -> PoolRules {
        PoolRules { sample: self.pool_sample, min_valid: self.min_valid_actions }
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

/// Read a config file; `.yaml`/`.yml` go through serde_yaml, anything else is JSON.
pub fn load_config(path: &Path) -> Result<MatchConfig> {
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let cfg = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse YAML config: {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON config: {}", path.display()))?
    };
    Ok(cfg)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchup {
    pub player: Combatant,
    pub bot: Combatant,
}

/// Player keeps the first N usable moves of its sampled pool.
pub fn player_combatant(
    provider: &dyn RosterProvider,
    query: &str,
    cfg: &MatchConfig,
    rng: &mut dyn Rolls,
) -> Result<Combatant> {
    let species = provider.fetch_combatant(query)?;
    let mut pool = provider.fetch_action_pool(&species, &cfg.pool_rules(), rng)?;
    pool.truncate(cfg.actions_per_combatant);
    Ok(Combatant::new(species.name, pool))
}

/// Bot takes a uniform random N of its usable moves, fixed for the match.
pub fn bot_combatant(
    provider: &dyn RosterProvider,
    query: &str,
    cfg: &MatchConfig,
    rng: &mut dyn Rolls,
) -> Result<Combatant> {
    let species = provider.fetch_combatant(query)?;
    let pool = provider.fetch_action_pool(&species, &cfg.pool_rules(), rng)?;
    let picked = sample_without_replacement(&pool, cfg.actions_per_combatant, rng);
    Ok(Combatant::new(species.name, picked))
}

/// Player by name or id against a random bot species.
pub fn prepare_matchup(
    provider: &dyn RosterProvider,
    player: &str,
    cfg: &MatchConfig,
    rng: &mut dyn Rolls,
) -> Result<Matchup> {
    let player = player_combatant(provider, player, cfg, rng)
        .with_context(|| format!("could not set up '{}'", player.trim()))?;
    let bot_species = random_species(provider, cfg.bot_max_id, rng)?;
    let bot = bot_combatant(provider, &bot_species.id.to_string(), cfg, rng)
        .with_context(|| format!("could not set up bot '{}'", bot_species.name))?;
    info!(player = %player.name, bot = %bot.name, "matchup ready");
    Ok(Matchup { player, bot })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelConfig {
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub max_hp: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelReport {
    pub a: String,
    pub b: String,
    pub result: MatchResult,
    pub turns: u32,
    pub a_hp_end: u32,
    pub b_hp_end: u32,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelStats {
    pub samples: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
    pub avg_turns: f64,
}

/// Read a text file, decoding by BOM (UTF-8, UTF-16LE/BE); no BOM means UTF-8.
pub fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// Catalog from a JSON file, or the built-in roster when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => {
            let text = read_text_auto(p)
                .with_context(|| format!("failed to read catalog: {}", p.display()))?;
            Catalog::from_json_str(&text)
                .with_context(|| format!("failed to parse catalog JSON: {}", p.display()))
        }
        None => Ok(Catalog::builtin()?),
    }
}

fn duel_once(catalog: &Catalog, cfg: &DuelConfig, seed: u64) -> Result<DuelReport> {
    let match_cfg = MatchConfig {
        max_hp: cfg.max_hp.unwrap_or(DEFAULT_MAX_HP),
        ..MatchConfig::default()
    };
    let mut rng = Dice::from_seed(seed);
    let a = bot_combatant(catalog, &cfg.a, &match_cfg, &mut rng)?;
    let b = bot_combatant(catalog, &cfg.b, &match_cfg, &mut rng)?;
    let (a_name, b_name) = (a.name.clone(), b.name.clone());
    let mut duel = Duel::new(a, b, match_cfg.max_hp)?;

    let mut log = Vec::new();
    let finale = run_match(
        &mut duel,
        &mut RandomChooser,
        &mut RandomChooser,
        &mut rng,
        Duration::ZERO,
        |event: MatchEvent| {
            let line = match &event {
                MatchEvent::Started { player, bot } => Some(format!("[START] {} vs {}", player, bot)),
                MatchEvent::Finished { result, .. } => Some(format!("[END] {:?}", result)),
                other => other.narrate(),
            };
            log.extend(line);
        },
    )?;

    Ok(DuelReport {
        a: a_name,
        b: b_name,
        result: finale.result,
        turns: finale.turns,
        a_hp_end: finale.hp_a,
        b_hp_end: finale.hp_b,
        log,
    })
}

/// One bot-vs-bot match between two catalog species.
pub fn simulate_duel(cfg: DuelConfig) -> Result<DuelReport> {
    let catalog = load_catalog(cfg.catalog_path.as_deref().map(Path::new))?;
    duel_once(&catalog, &cfg, cfg.seed)
}

/// `samples` matches; sample i uses `seed + i`.
pub fn simulate_duel_many(cfg: DuelConfig, samples: u32) -> Result<DuelStats> {
    let catalog = load_catalog(cfg.catalog_path.as_deref().map(Path::new))?;
    let mut stats = DuelStats { samples, ..DuelStats::default() };
    let mut total_turns = 0u64;
    for i in 0..samples {
        let report = duel_once(&catalog, &cfg, cfg.seed.wrapping_add(i as u64))?;
        total_turns += report.turns as u64;
        match report.result.winner() {
            Some(Party::A) => stats.a_wins += 1,
            Some(Party::B) => stats.b_wins += 1,
            None => stats.draws += 1,
        }
    }
    if samples > 0 {
        stats.avg_turns = total_turns as f64 / samples as f64;
    }
    Ok(stats)
}
