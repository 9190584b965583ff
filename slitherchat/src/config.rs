use macroquad::prelude::Conf;
use serde::Deserialize;
use thiserror::Error;

// Window constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;

/// Food never spawns closer than this to a wall.
pub const FOOD_SPAWN_MARGIN: f64 = 20.0;
/// Snakes never spawn closer than this to a wall.
pub const SNAKE_SPAWN_MARGIN: f64 = 50.0;

pub const DEFAULT_SNAKE_COLORS: [u32; 8] = [
    0x4CAF50, // green
    0x2196F3, // blue
    0xF44336, // red
    0xFF9800, // orange
    0x9C27B0, // purple
    0xFFEB3B, // yellow
    0x00BCD4, // cyan
    0xFF5722, // deep orange
];

pub const DEFAULT_FOOD_COLORS: [u32; 5] = [0xF44336, 0xE91E63, 0x9C27B0, 0x673AB7, 0x3F51B5];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick_rate must be positive, got {0}")]
    InvalidTickRate(f64),
    #[error("world {width}x{height} is too small, both sides must exceed {min}")]
    WorldTooSmall { width: f64, height: f64, min: f64 },
    #[error("initial_snake_size must be at least 2, got {0}")]
    SnakeTooShort(usize),
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{0} palette must not be empty")]
    EmptyPalette(&'static str),
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("chat interval is inverted: min {min}ms > max {max}ms")]
    InvertedChatInterval { min: u64, max: u64 },
    #[error("leaderboard_interval must be at least one tick")]
    ZeroLeaderboardInterval,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ChatConfig {
    /// Feed the world from a local roster instead of a live chat.
    pub simulate: bool,
    pub usernames: Vec<String>,
    /// Texts the simulated users pick from.
    pub messages: Vec<String>,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    /// Lines kept in the chat feed.
    pub max_messages: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            simulate: false,
            usernames: [
                "Player1",
                "CoolGamer",
                "SnakeHunter",
                "SnakeMaster",
                "Wanderer123",
                "FastSnake",
                "GameLover",
                "Hunter555",
                "FoodCollector",
                "KingSnake",
                "Tactician",
                "QuickRoamer",
                "SnakeKing",
                "SuperPlayer",
                "BlueBead",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            messages: [
                "Hello world!",
                "SlitherChat is so much fun!",
                "I want to play too!",
                "The green snake is mine!",
                "Red snakes are fast!",
                "This game is great!",
                "Watch out for the snakes!",
                "I grew so big!",
                "Who is winning?",
                "Go go go!",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            min_interval_ms: 1000,
            max_interval_ms: 3000,
            max_messages: 50,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderConfig {
    pub background_color: u32,
    pub grid_color: u32,
    pub grid_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: 0x0A0A0A,
            grid_color: 0x1A1A1A,
            grid_size: 20.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    /// Nominal simulation ticks per second.
    pub tick_rate: f64,
    pub world_width: f64,
    pub world_height: f64,
    pub initial_snake_size: usize,
    /// Distance covered per nominal tick.
    pub snake_speed: f64,
    pub turn_speed: f64,
    pub vision_range: f64,
    /// Seconds between two steering decisions of the same snake.
    pub ai_update_interval: f64,
    pub max_food: usize,
    pub initial_food: usize,
    /// Probability of one new food item per tick.
    pub food_spawn_rate: f64,
    pub food_size: f64,
    pub snake_colors: Vec<u32>,
    pub food_colors: Vec<u32>,
    pub max_leaderboard_entries: usize,
    /// Ticks between two leaderboard recomputations.
    pub leaderboard_interval: u64,
    pub seed: Option<u64>,
    pub chat: ChatConfig,
    pub render: RenderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            world_width: 1280.0,
            world_height: 720.0,
            initial_snake_size: 5,
            snake_speed: 3.0,
            turn_speed: 0.1,
            vision_range: 200.0,
            ai_update_interval: 0.5,
            max_food: 100,
            initial_food: 30,
            food_spawn_rate: 0.1,
            food_size: 5.0,
            snake_colors: DEFAULT_SNAKE_COLORS.to_vec(),
            food_colors: DEFAULT_FOOD_COLORS.to_vec(),
            max_leaderboard_entries: 10,
            leaderboard_interval: 60,
            seed: None,
            chat: ChatConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        let min_side = 2.0 * SNAKE_SPAWN_MARGIN.max(FOOD_SPAWN_MARGIN);
        if !(self.world_width > min_side && self.world_height > min_side) {
            return Err(ConfigError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                min: min_side,
            });
        }
        if self.initial_snake_size < 2 {
            return Err(ConfigError::SnakeTooShort(self.initial_snake_size));
        }
        if !(0.0..=1.0).contains(&self.food_spawn_rate) {
            return Err(ConfigError::InvalidProbability {
                name: "food_spawn_rate",
                value: self.food_spawn_rate,
            });
        }
        for (name, value) in [
            ("snake_speed", self.snake_speed),
            ("turn_speed", self.turn_speed),
            ("vision_range", self.vision_range),
            ("ai_update_interval", self.ai_update_interval),
            ("food_size", self.food_size),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.snake_colors.is_empty() {
            return Err(ConfigError::EmptyPalette("snake_colors"));
        }
        if self.food_colors.is_empty() {
            return Err(ConfigError::EmptyPalette("food_colors"));
        }
        if self.leaderboard_interval == 0 {
            return Err(ConfigError::ZeroLeaderboardInterval);
        }
        if self.chat.min_interval_ms > self.chat.max_interval_ms {
            return Err(ConfigError::InvertedChatInterval {
                min: self.chat.min_interval_ms,
                max: self.chat.max_interval_ms,
            });
        }
        Ok(())
    }
}

/// Configuration for the entire application including CLI parameters
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub autostart: bool,
}

impl AppConfig {
    pub fn from_cli_and_config(
        cli: &crate::Cli,
        mut simulation: SimulationConfig,
    ) -> Result<Self, ConfigError> {
        if let Some(seed) = cli.seed {
            simulation.seed = Some(seed);
        }
        if cli.simulate_chat {
            simulation.chat.simulate = true;
        }

        simulation.validate()?;

        Ok(Self {
            simulation,
            autostart: cli.autostart,
        })
    }
}

pub fn window_conf() -> Conf {
    Conf {
        window_title: "SlitherChat".to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH as i32,
        window_height: DEFAULT_WINDOW_HEIGHT as i32,
        high_dpi: true,
        ..Default::default()
    }
}

/// Parses a `#RRGGBB` (or `RRGGBB`) color string.
pub fn parse_hex_color(text: &str) -> Option<u32> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
