//! Campaign - the ordered run through the configured levels
//!
//! Health carries over from one level to the next. Free play is a single
//! level outside the campaign with one life and a target of filling the map.

use tracing::info;

use crate::error::Result;
use crate::level::{Level, LevelState};
use crate::settings::Settings;

/// Where the campaign stands after a level ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignProgress {
    /// Level won, more to play
    Next { health: u32 },
    /// Last level won
    Won { health: u32 },
    Lost,
    /// Level is still being played
    InProgress,
}

#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<String>,
    current: usize,
    health: u32,
}

impl Campaign {
    pub fn new(levels: Vec<String>, start_health: u32) -> Self {
        Self {
            levels,
            current: 0,
            health: start_health,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.levels.clone(), settings.start_health)
    }

    /// Name of the level to play next, `None` once the campaign is over
    pub fn current_level(&self) -> Option<&str> {
        self.levels.get(self.current).map(String::as_str)
    }

    /// 1-based position of the current level
    pub fn level_number(&self) -> usize {
        self.current + 1
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Load the current level with the health carried so far.
    ///
    /// Returns `Ok(None)` when every level has been played.
    pub fn load_current(&self, settings: &Settings) -> Result<Option<Level>> {
        let Some(name) = self.current_level() else {
            return Ok(None);
        };
        let level = Level::from_map(name, &settings.map_path(name), self.health)?
            .with_basic_food(settings.basic()?)
            .with_seed(level_seed(settings, self.current));
        Ok(Some(level))
    }

    /// Record the result of a played level and move on if it was won
    pub fn finish(&mut self, level: &Level) -> CampaignProgress {
        match level.state() {
            LevelState::Playing => CampaignProgress::InProgress,
            LevelState::GameOver => {
                self.health = 0;
                info!(level = level.name(), "campaign lost");
                CampaignProgress::Lost
            }
            LevelState::Won => {
                self.health = level.health();
                self.current += 1;
                if self.current >= self.levels.len() {
                    info!(health = self.health, "campaign won");
                    CampaignProgress::Won {
                        health: self.health,
                    }
                } else {
                    CampaignProgress::Next {
                        health: self.health,
                    }
                }
            }
        }
    }
}

/// Free-play level: one life, target is filling every open cell
pub fn free_play(settings: &Settings) -> Result<Level> {
    let name = settings.free_level.as_str();
    let level = Level::from_map(name, &settings.map_path(name), 1)?
        .with_basic_food(settings.basic()?)
        .with_seed(settings.seed.unwrap_or(1));
    let target = level.free_play_target();
    Ok(level.with_max_score(target))
}

fn level_seed(settings: &Settings, index: usize) -> u32 {
    settings.seed.unwrap_or(1).wrapping_add(index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::snake::Snake;
    use crate::types::{Direction, Vector};
    use std::collections::HashSet;

    fn level(health: u32) -> Level {
        let snake = Snake::centered(Vector::new(3, 3), Direction::Right);
        let field = Field::new(snake, HashSet::new(), (8, 8)).unwrap();
        Level::new(field, 0, health)
    }

    fn won(health: u32) -> Level {
        let mut level = level(health);
        level.step_snake(None).unwrap();
        assert!(level.is_won());
        level
    }

    fn lost() -> Level {
        let mut level = level(1);
        level.lose();
        level
    }

    fn campaign() -> Campaign {
        Campaign::new(vec!["a".into(), "b".into()], 3)
    }

    #[test]
    fn starts_at_first_level() {
        let campaign = campaign();
        assert_eq!(campaign.current_level(), Some("a"));
        assert_eq!(campaign.level_number(), 1);
        assert_eq!(campaign.health(), 3);
    }

    #[test]
    fn winning_advances_and_carries_health() {
        let mut campaign = campaign();
        assert_eq!(campaign.finish(&won(2)), CampaignProgress::Next { health: 2 });
        assert_eq!(campaign.current_level(), Some("b"));
        assert_eq!(campaign.health(), 2);

        assert_eq!(campaign.finish(&won(2)), CampaignProgress::Won { health: 2 });
        assert_eq!(campaign.current_level(), None);
    }

    #[test]
    fn game_over_loses_campaign() {
        let mut campaign = campaign();
        assert_eq!(campaign.finish(&lost()), CampaignProgress::Lost);
        assert_eq!(campaign.current_level(), Some("a"));
    }

    #[test]
    fn unfinished_level_is_in_progress() {
        let mut campaign = campaign();
        assert_eq!(campaign.finish(&level(3)), CampaignProgress::InProgress);
        assert_eq!(campaign.level_number(), 1);
    }

    #[test]
    fn finished_campaign_loads_nothing() {
        let mut campaign = Campaign::new(vec!["a".into()], 3);
        campaign.finish(&won(3));
        assert!(campaign.load_current(&Settings::default()).unwrap().is_none());
    }
}
