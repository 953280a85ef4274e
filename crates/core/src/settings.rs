//! Game settings loaded from a JSON file plus environment overrides
//!
//! Every field has a default, so a missing file or a partial file both work.
//!
//! ```json
//! {
//!   "levels_dir": "levels",
//!   "levels": ["level_1", "level_2"],
//!   "foods": { "basic_apple": { "speed_change": 1.0, "length_change": 1, "score": 1 } }
//! }
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{Food, DEFAULT_HEALTH, FRAME_RATE, SPECIAL_FOOD_PERIOD_SECS};

/// One food catalog entry as it appears in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodSpec {
    pub speed_change: f64,
    pub length_change: i32,
    pub score: i32,
}

impl FoodSpec {
    pub fn to_food(self) -> Result<Food> {
        Food::new(self.speed_change, self.length_change, self.score)
            .ok_or(Error::InvalidFood(self.speed_change))
    }
}

impl From<Food> for FoodSpec {
    fn from(food: Food) -> Self {
        Self {
            speed_change: food.speed_change(),
            length_change: food.length_change(),
            score: food.score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub levels_dir: PathBuf,
    pub map_file: String,
    pub levels: Vec<String>,
    pub free_level: String,
    pub frame_rate: u32,
    pub special_food_period_secs: u32,
    pub start_health: u32,
    pub basic_food: String,
    /// Sorted by name so special food choice is stable for a given seed
    pub foods: BTreeMap<String, FoodSpec>,
    pub seed: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        let foods = [
            ("basic_apple", FoodSpec::from(Food::BASIC)),
            (
                "gold_apple",
                FoodSpec {
                    speed_change: 1.0,
                    length_change: 1,
                    score: 3,
                },
            ),
            (
                "high_speed_apple",
                FoodSpec {
                    speed_change: 1.25,
                    length_change: 1,
                    score: 2,
                },
            ),
            (
                "wormy_apple",
                FoodSpec {
                    speed_change: 0.8,
                    length_change: -1,
                    score: 1,
                },
            ),
        ];

        Self {
            levels_dir: PathBuf::from("levels"),
            map_file: "map.txt".to_string(),
            levels: vec![
                "level_1".to_string(),
                "level_2".to_string(),
                "level_3".to_string(),
            ],
            free_level: "free".to_string(),
            frame_rate: FRAME_RATE,
            special_food_period_secs: SPECIAL_FOOD_PERIOD_SECS,
            start_health: DEFAULT_HEALTH,
            basic_food: "basic_apple".to_string(),
            foods: foods
                .into_iter()
                .map(|(name, spec)| (name.to_string(), spec))
                .collect(),
            seed: None,
        }
    }
}

impl Settings {
    /// Load from `SNAKE_SETTINGS` (default `settings.json`), then apply
    /// `SNAKE_LEVELS_DIR` and `SNAKE_SEED`.
    pub fn from_env() -> Result<Self> {
        let path = env::var("SNAKE_SETTINGS").unwrap_or_else(|_| "settings.json".to_string());
        let mut settings = match Self::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(path = %path, "settings file not found, using defaults");
                Self::default()
            }
            Err(err) => return Err(err),
        };

        if let Some(dir) = env::var("SNAKE_LEVELS_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            settings.levels_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = env::var("SNAKE_SEED") {
            match raw.trim().parse() {
                Ok(seed) => settings.seed = Some(seed),
                Err(_) => warn!(value = %raw, "ignoring non-numeric SNAKE_SEED"),
            }
        }

        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Map file of a named level
    pub fn map_path(&self, level: &str) -> PathBuf {
        self.levels_dir.join(level).join(&self.map_file)
    }

    pub fn basic(&self) -> Result<Food> {
        self.food(&self.basic_food)
    }

    pub fn food(&self, name: &str) -> Result<Food> {
        self.foods
            .get(name)
            .ok_or_else(|| Error::UnknownFood(name.to_string()))?
            .to_food()
    }

    /// Catalog minus the basic food, in name order
    pub fn special_foods(&self) -> Result<Vec<Food>> {
        let basic = self.basic()?;
        let mut specials = Vec::with_capacity(self.foods.len());
        for spec in self.foods.values() {
            let food = spec.to_food()?;
            if food != basic && !specials.contains(&food) {
                specials.push(food);
            }
        }
        Ok(specials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let settings = Settings::default();
        assert_eq!(settings.frame_rate, 120);
        assert_eq!(settings.start_health, 3);
        assert_eq!(settings.basic().unwrap(), Food::BASIC);
        assert_eq!(settings.special_foods().unwrap().len(), 3);
        assert!(settings.special_foods().unwrap().iter().all(|f| !f.is_basic()));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "frame_rate": 60, "seed": 9 }"#).unwrap();
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.levels, Settings::default().levels);
    }

    #[test]
    fn map_path_joins_level_dir() {
        let settings = Settings::default();
        assert_eq!(
            settings.map_path("level_1"),
            Path::new("levels").join("level_1").join("map.txt")
        );
    }

    #[test]
    fn unknown_basic_food() {
        let mut settings = Settings::default();
        settings.basic_food = "pear".to_string();
        assert!(matches!(settings.basic(), Err(Error::UnknownFood(name)) if name == "pear"));
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let mut settings = Settings::default();
        settings.foods.insert(
            "stone".to_string(),
            FoodSpec {
                speed_change: 0.0,
                length_change: 0,
                score: 0,
            },
        );
        assert!(matches!(settings.special_foods(), Err(Error::InvalidFood(_))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Settings::from_json("{"), Err(Error::Settings(_))));
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings::default();
        let text = settings.to_json().unwrap();
        let back = Settings::from_json(&text).unwrap();
        assert_eq!(back.levels, settings.levels);
        assert_eq!(back.basic().unwrap(), Food::BASIC);
        assert_eq!(
            back.foods.keys().collect::<Vec<_>>(),
            settings.foods.keys().collect::<Vec<_>>()
        );
    }
}
